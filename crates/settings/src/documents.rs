//! Typed settings documents.
//!
//! The persistence collaborator stores settings as schemaless JSON blobs;
//! every logical sub-document is modeled here as an explicit struct with
//! named optional fields so each fallback is visible and testable, rather
//! than merged by dynamic object-spread.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vantage_policy::{Module, ModuleCapability, RolePolicy, ViewProfile, ViewProfileId};

/// Tenant-scoped settings record (one blob per tenant).
///
/// Absent sub-documents mean "use defaults" throughout; writers must
/// preserve the sub-documents they do not touch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantSettings {
    pub company: Option<CompanyInfo>,
    pub notifications: Option<NotificationPreferences>,
    pub general: Option<GeneralSettings>,
    /// Tenant override of the default role-policy table (whole-list
    /// replacement; never partially merged).
    pub permissions: Option<Vec<RolePolicy>>,
    /// Tenant override of the default view-profile list (whole-list
    /// replacement).
    pub view_profiles: Option<Vec<ViewProfile>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Company identity shown on receipts and invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub legal_name: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Per-tenant notification toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub low_stock_alerts: Option<bool>,
    pub daily_sales_summary: Option<bool>,
    pub service_order_updates: Option<bool>,
    pub overdue_invoice_alerts: Option<bool>,
}

/// Miscellaneous tenant-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub receipt_footer: Option<String>,
    pub default_tax_rate: Option<f64>,
}

/// Per-user permission override blob.
///
/// Every field absent means "inherit" (from the role policy / view
/// profile / literal defaults). The lifecycle is
/// `absent → populated (set) → reset → populated → …`, with
/// `use_custom_permissions` switching resolution between role-sourced and
/// custom-sourced mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserOverride {
    pub view_profile: Option<ViewProfileId>,
    pub use_custom_permissions: bool,
    #[serde(rename = "customPermissions")]
    pub custom_capabilities: Option<Vec<ModuleCapability>>,
    pub allowed_modules: Option<BTreeSet<Module>>,
    pub default_page: Option<String>,
    pub can_apply_discounts: Option<bool>,
    pub max_discount_percent: Option<f64>,
    pub can_process_refunds: Option<bool>,
    pub can_access_reports: Option<bool>,
    pub can_export_data: Option<bool>,
}

impl UserOverride {
    /// Decode a stored override blob. An absent or undecodable blob is
    /// missing configuration, not an error: it yields the all-absent
    /// override (undecodable content is logged and discarded).
    pub fn from_blob(blob: Option<&serde_json::Value>) -> UserOverride {
        match blob {
            None => UserOverride::default(),
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding undecodable user override blob");
                    UserOverride::default()
                }
            },
        }
    }

    /// Apply a partial patch: each present field overwrites the stored
    /// field, absent fields are left untouched. This is deliberately
    /// field-level merge, unlike the whole-list replacement used for
    /// tenant policy/profile lists.
    pub fn apply(&mut self, patch: UserOverridePatch) {
        if let Some(v) = patch.view_profile {
            self.view_profile = Some(v);
        }
        if let Some(v) = patch.use_custom_permissions {
            self.use_custom_permissions = v;
        }
        if let Some(v) = patch.custom_capabilities {
            self.custom_capabilities = Some(v);
        }
        if let Some(v) = patch.allowed_modules {
            self.allowed_modules = Some(v);
        }
        if let Some(v) = patch.default_page {
            self.default_page = Some(v);
        }
        if let Some(v) = patch.can_apply_discounts {
            self.can_apply_discounts = Some(v);
        }
        if let Some(v) = patch.max_discount_percent {
            self.max_discount_percent = Some(v);
        }
        if let Some(v) = patch.can_process_refunds {
            self.can_process_refunds = Some(v);
        }
        if let Some(v) = patch.can_access_reports {
            self.can_access_reports = Some(v);
        }
        if let Some(v) = patch.can_export_data {
            self.can_export_data = Some(v);
        }
    }
}

/// Partial update of a [`UserOverride`]. Absent fields are not touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserOverridePatch {
    pub view_profile: Option<ViewProfileId>,
    pub use_custom_permissions: Option<bool>,
    #[serde(rename = "customPermissions")]
    pub custom_capabilities: Option<Vec<ModuleCapability>>,
    pub allowed_modules: Option<BTreeSet<Module>>,
    pub default_page: Option<String>,
    pub can_apply_discounts: Option<bool>,
    pub max_discount_percent: Option<f64>,
    pub can_process_refunds: Option<bool>,
    pub can_access_reports: Option<bool>,
    pub can_export_data: Option<bool>,
}
