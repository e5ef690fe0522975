//! Effective-permission resolution.
//!
//! - No panics
//! - No caching: every call reflects the latest persisted state
//! - Capability checks fail closed (unknown module/action/user → deny)

use tracing::debug;

use vantage_core::{DomainError, DomainResult, TenantId, UserId};
use vantage_policy::{
    default_profile_for_role, CapabilityAction, Module, ModuleCapability, Role, ViewProfileId,
};
use vantage_settings::{TenantPolicyStore, TenantSettingsRepository, UserDirectory, UserOverride};

use crate::effective::{EffectivePermissions, PermissionSource};

/// Literal defaults applied when neither override nor role supplies a value.
const DEFAULT_CAN_APPLY_DISCOUNTS: bool = true;
const DEFAULT_MAX_DISCOUNT_PERCENT: f64 = 15.0;
const DEFAULT_CAN_PROCESS_REFUNDS: bool = false;
const DEFAULT_CAN_ACCESS_REPORTS: bool = true;
const DEFAULT_CAN_EXPORT_DATA: bool = true;

/// Landing page used when custom mode carries no override for it.
const DEFAULT_LANDING_PAGE: &str = "/dashboard";

/// Pure merge of default table + tenant policy + user override.
///
/// The two store reads are sequential by data dependency (the override
/// takes precedence over the role policy it shadows); there is no other
/// ordering concern and no retry. Lookup failures are terminal for the
/// call.
pub struct PermissionResolver<D, R> {
    directory: D,
    policies: TenantPolicyStore<R>,
}

impl<D, R> PermissionResolver<D, R>
where
    D: UserDirectory,
    R: TenantSettingsRepository,
{
    pub fn new(directory: D, policies: TenantPolicyStore<R>) -> Self {
        Self {
            directory,
            policies,
        }
    }

    /// Resolve the effective permissions for one user.
    pub fn resolve(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> DomainResult<EffectivePermissions> {
        let user = self.directory.load_user(tenant_id, user_id).ok_or_else(|| {
            DomainError::not_found(format!("user {user_id} in tenant {tenant_id}"))
        })?;
        let override_ = UserOverride::from_blob(user.override_blob.as_ref());

        // Custom mode is fully self-contained: the role policy is never
        // consulted, only the override and the literal defaults.
        if override_.use_custom_permissions {
            if let Some(custom) = override_.custom_capabilities.clone() {
                return Ok(resolve_custom(custom, override_));
            }
        }

        Ok(self.resolve_role(tenant_id, user.role, override_))
    }

    fn resolve_role(
        &self,
        tenant_id: TenantId,
        role: Role,
        override_: UserOverride,
    ) -> EffectivePermissions {
        let policy = self.policies.role_policy(tenant_id, role);

        let profile_id = override_
            .view_profile
            .unwrap_or_else(|| default_profile_for_role(role));
        let profile = self.policies.view_profile(tenant_id, &profile_id);

        EffectivePermissions {
            source: PermissionSource::Role,
            capabilities: policy.capabilities,
            view_profile: profile_id,
            allowed_modules: override_
                .allowed_modules
                .unwrap_or(profile.allowed_modules),
            default_page: override_
                .default_page
                .unwrap_or(profile.default_landing_page),
            can_apply_discounts: override_
                .can_apply_discounts
                .unwrap_or(DEFAULT_CAN_APPLY_DISCOUNTS),
            max_discount_percent: override_
                .max_discount_percent
                .unwrap_or(DEFAULT_MAX_DISCOUNT_PERCENT),
            can_process_refunds: override_
                .can_process_refunds
                .unwrap_or(matches!(role, Role::Admin | Role::Manager)),
            can_access_reports: override_
                .can_access_reports
                .unwrap_or(role != Role::Viewer),
            can_export_data: override_.can_export_data.unwrap_or(role != Role::Viewer),
        }
    }

    /// Capability check used by every guarded operation. Fail-closed:
    /// unknown module or action names, missing users, and any resolution
    /// failure all deny rather than error.
    pub fn has_capability(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        module: &str,
        action: &str,
    ) -> bool {
        let (Some(module), Some(action)) =
            (Module::from_name(module), CapabilityAction::from_name(action))
        else {
            return false;
        };

        match self.resolve(tenant_id, user_id) {
            Ok(effective) => effective.allows(module, action),
            Err(err) => {
                debug!(%tenant_id, %user_id, error = %err, "capability check denied on resolution failure");
                false
            }
        }
    }

    /// Lighter-weight role-only check, skipping the user lookup.
    pub fn check_role_capability(
        &self,
        tenant_id: TenantId,
        role: Role,
        module: &str,
        action: &str,
    ) -> bool {
        let (Some(module), Some(action)) =
            (Module::from_name(module), CapabilityAction::from_name(action))
        else {
            return false;
        };

        let policy = self.policies.role_policy(tenant_id, role);
        vantage_policy::capability_for(&policy.capabilities, module).allows(action)
    }
}

fn resolve_custom(
    custom: Vec<ModuleCapability>,
    override_: UserOverride,
) -> EffectivePermissions {
    let derived_modules = custom
        .iter()
        .filter(|c| c.view)
        .map(|c| c.module)
        .collect();

    EffectivePermissions {
        source: PermissionSource::Custom,
        allowed_modules: override_.allowed_modules.unwrap_or(derived_modules),
        default_page: override_
            .default_page
            .unwrap_or_else(|| DEFAULT_LANDING_PAGE.to_string()),
        view_profile: override_.view_profile.unwrap_or(ViewProfileId::CUSTOM),
        can_apply_discounts: override_
            .can_apply_discounts
            .unwrap_or(DEFAULT_CAN_APPLY_DISCOUNTS),
        max_discount_percent: override_
            .max_discount_percent
            .unwrap_or(DEFAULT_MAX_DISCOUNT_PERCENT),
        can_process_refunds: override_
            .can_process_refunds
            .unwrap_or(DEFAULT_CAN_PROCESS_REFUNDS),
        can_access_reports: override_
            .can_access_reports
            .unwrap_or(DEFAULT_CAN_ACCESS_REPORTS),
        can_export_data: override_
            .can_export_data
            .unwrap_or(DEFAULT_CAN_EXPORT_DATA),
        capabilities: custom,
    }
}
