//! In-process permission service facade.
//!
//! This is the surface the surrounding CRUD/HTTP layer calls. It returns
//! language-native structures; mutating operations answer with a short
//! message plus the stored state, mirroring what the admin screens render.

use serde::{Deserialize, Serialize};
use tracing::info;

use vantage_core::{DomainResult, TenantId, UserId};
use vantage_policy::{
    default_profile_for_role, Role, RolePolicy, ViewProfile, ViewProfileId,
};
use vantage_settings::{
    TenantPolicyStore, TenantSettingsRepository, UserDirectory, UserOverride, UserOverridePatch,
    UserOverrideStore,
};

use crate::effective::EffectivePermissions;
use crate::resolver::PermissionResolver;

/// Result of a role-policy mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyUpdate {
    pub message: String,
    pub permissions: Vec<RolePolicy>,
}

/// Result of a view-profile mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub message: String,
    pub profiles: Vec<ViewProfile>,
}

/// Result of a user-override mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideUpdate {
    pub message: String,
    pub stored: UserOverride,
}

/// The admin-screen read model for one user's individual permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOverrideView {
    pub user_id: UserId,
    pub role: Role,
    pub role_default_profile: ViewProfileId,
    pub stored: UserOverride,
}

/// Facade combining the guarded stores and the resolver.
pub struct PermissionService<D, R> {
    policies: TenantPolicyStore<R>,
    overrides: UserOverrideStore<D>,
    resolver: PermissionResolver<D, R>,
}

impl<D, R> PermissionService<D, R>
where
    D: UserDirectory + Clone,
    R: TenantSettingsRepository + Clone,
{
    pub fn new(directory: D, repository: R) -> Self {
        let policies = TenantPolicyStore::new(repository);
        Self {
            overrides: UserOverrideStore::new(directory.clone()),
            resolver: PermissionResolver::new(directory, policies.clone()),
            policies,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Role policies
    // ─────────────────────────────────────────────────────────────────────

    pub fn permissions(&self, tenant_id: TenantId) -> Vec<RolePolicy> {
        self.policies.role_policies(tenant_id)
    }

    pub fn role_permissions(&self, tenant_id: TenantId, role: Role) -> RolePolicy {
        self.policies.role_policy(tenant_id, role)
    }

    pub fn check_permission(
        &self,
        tenant_id: TenantId,
        role: Role,
        module: &str,
        action: &str,
    ) -> bool {
        self.resolver
            .check_role_capability(tenant_id, role, module, action)
    }

    pub fn update_permissions(
        &self,
        tenant_id: TenantId,
        actor: Role,
        policies: Vec<RolePolicy>,
    ) -> DomainResult<PolicyUpdate> {
        let permissions = self
            .policies
            .set_role_policies(tenant_id, actor, policies)?;
        info!(%tenant_id, actor = %actor, count = permissions.len(), "role policies replaced");
        Ok(PolicyUpdate {
            message: "Permissions updated successfully.".to_string(),
            permissions,
        })
    }

    pub fn reset_permissions_to_default(
        &self,
        tenant_id: TenantId,
        actor: Role,
    ) -> DomainResult<PolicyUpdate> {
        let permissions = self.policies.reset_role_policies(tenant_id, actor)?;
        info!(%tenant_id, actor = %actor, "role policies reset to defaults");
        Ok(PolicyUpdate {
            message: "Permissions restored to defaults.".to_string(),
            permissions,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // View profiles
    // ─────────────────────────────────────────────────────────────────────

    pub fn view_profiles(&self, tenant_id: TenantId) -> Vec<ViewProfile> {
        self.policies.view_profiles(tenant_id)
    }

    pub fn update_view_profiles(
        &self,
        tenant_id: TenantId,
        actor: Role,
        profiles: Vec<ViewProfile>,
    ) -> DomainResult<ProfileUpdate> {
        let profiles = self
            .policies
            .set_view_profiles(tenant_id, actor, profiles)?;
        info!(%tenant_id, actor = %actor, count = profiles.len(), "view profiles replaced");
        Ok(ProfileUpdate {
            message: "View profiles updated successfully.".to_string(),
            profiles,
        })
    }

    pub fn reset_view_profiles_to_default(
        &self,
        tenant_id: TenantId,
        actor: Role,
    ) -> DomainResult<ProfileUpdate> {
        let profiles = self.policies.reset_view_profiles(tenant_id, actor)?;
        info!(%tenant_id, actor = %actor, "view profiles reset to defaults");
        Ok(ProfileUpdate {
            message: "View profiles restored to defaults.".to_string(),
            profiles,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Per-user overrides
    // ─────────────────────────────────────────────────────────────────────

    pub fn user_permissions(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> DomainResult<UserOverrideView> {
        let role = self.overrides.role_of(tenant_id, user_id)?;
        let stored = self.overrides.override_for(tenant_id, user_id)?;
        Ok(UserOverrideView {
            user_id,
            role,
            role_default_profile: default_profile_for_role(role),
            stored,
        })
    }

    pub fn update_user_permissions(
        &self,
        tenant_id: TenantId,
        actor: Role,
        user_id: UserId,
        patch: UserOverridePatch,
    ) -> DomainResult<OverrideUpdate> {
        let stored = self
            .overrides
            .set_override(tenant_id, actor, user_id, patch)?;
        info!(%tenant_id, %user_id, actor = %actor, "user override updated");
        Ok(OverrideUpdate {
            message: "User permissions updated successfully.".to_string(),
            stored,
        })
    }

    pub fn reset_user_permissions(
        &self,
        tenant_id: TenantId,
        actor: Role,
        user_id: UserId,
    ) -> DomainResult<OverrideUpdate> {
        let stored = self.overrides.reset_override(tenant_id, actor, user_id)?;
        info!(%tenant_id, %user_id, actor = %actor, "user override reset to role default");
        Ok(OverrideUpdate {
            message: "User permissions reset to role default.".to_string(),
            stored,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────────────────

    pub fn effective_permissions(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> DomainResult<EffectivePermissions> {
        self.resolver.resolve(tenant_id, user_id)
    }

    pub fn has_capability(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        module: &str,
        action: &str,
    ) -> bool {
        self.resolver
            .has_capability(tenant_id, user_id, module, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vantage_policy::default_role_policies;
    use vantage_settings::{InMemoryTenantSettings, InMemoryUserDirectory};

    fn service() -> (
        PermissionService<Arc<InMemoryUserDirectory>, Arc<InMemoryTenantSettings>>,
        Arc<InMemoryUserDirectory>,
        TenantId,
    ) {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let repository = Arc::new(InMemoryTenantSettings::new());
        let service = PermissionService::new(Arc::clone(&directory), repository);
        (service, directory, TenantId::new())
    }

    #[test]
    fn update_permissions_answers_with_message_and_stored_list() {
        let (service, _, tenant_id) = service();

        let update = service
            .update_permissions(tenant_id, Role::Admin, default_role_policies())
            .unwrap();
        assert_eq!(update.message, "Permissions updated successfully.");
        assert_eq!(update.permissions, service.permissions(tenant_id));
    }

    #[test]
    fn user_permissions_view_carries_role_and_default_profile() {
        let (service, directory, tenant_id) = service();
        let user_id = UserId::new();
        directory.insert_user(tenant_id, user_id, Role::Manager);

        let view = service.user_permissions(tenant_id, user_id).unwrap();
        assert_eq!(view.role, Role::Manager);
        assert_eq!(view.role_default_profile, ViewProfileId::MANAGER);
        assert_eq!(view.stored, UserOverride::default());
    }

    #[test]
    fn check_permission_is_a_pure_role_check() {
        let (service, _, tenant_id) = service();
        assert!(service.check_permission(tenant_id, Role::Seller, "pdv", "create"));
        assert!(!service.check_permission(tenant_id, Role::Seller, "users", "view"));
    }
}
