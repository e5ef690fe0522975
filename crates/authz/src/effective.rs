use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use vantage_policy::{capability_for, CapabilityAction, Module, ModuleCapability, ViewProfileId};

/// Which source the effective capability list came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionSource {
    /// The user's own capability list (`use_custom_permissions`).
    Custom,
    /// The tenant's policy entry for the user's role.
    Role,
}

/// The final, resolved permission set and auxiliary flags for one user.
///
/// Derived, never persisted: every resolution reflects the latest stored
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivePermissions {
    pub source: PermissionSource,
    pub capabilities: Vec<ModuleCapability>,
    pub view_profile: ViewProfileId,
    pub allowed_modules: BTreeSet<Module>,
    pub default_page: String,
    pub can_apply_discounts: bool,
    pub max_discount_percent: f64,
    pub can_process_refunds: bool,
    pub can_access_reports: bool,
    pub can_export_data: bool,
}

impl EffectivePermissions {
    /// Capability lookup over the resolved list; a module absent from the
    /// list denies every action.
    pub fn allows(&self, module: Module, action: CapabilityAction) -> bool {
        capability_for(&self.capabilities, module).allows(action)
    }

    /// Whether the module appears in the user's navigation.
    pub fn module_visible(&self, module: Module) -> bool {
        self.allowed_modules.contains(&module)
    }
}
