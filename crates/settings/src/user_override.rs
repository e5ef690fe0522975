//! Per-user override storage with the ADMIN/MANAGER mutation contract.

use tracing::warn;

use vantage_core::{DomainError, DomainResult, TenantId, UserId};
use vantage_policy::{default_profile_for_role, Module, Role};

use crate::documents::{UserOverride, UserOverridePatch};
use crate::store::{UserDirectory, UserRecord};

/// Persist and retrieve the per-user override blob.
///
/// Mutations require ADMIN or MANAGER; a MANAGER may not alter an ADMIN's
/// permissions. That restriction is the one hand-coded hierarchy rule in
/// the system and deliberately lives here as a guard clause rather than a
/// general role lattice.
pub struct UserOverrideStore<D> {
    directory: D,
}

impl<D: Clone> Clone for UserOverrideStore<D> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}

impl<D> UserOverrideStore<D>
where
    D: UserDirectory,
{
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    fn load_user(&self, tenant_id: TenantId, user_id: UserId) -> DomainResult<UserRecord> {
        self.directory
            .load_user(tenant_id, user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {user_id} in tenant {tenant_id}")))
    }

    /// The target user's role (NotFound if the user is not in the tenant).
    pub fn role_of(&self, tenant_id: TenantId, user_id: UserId) -> DomainResult<Role> {
        Ok(self.load_user(tenant_id, user_id)?.role)
    }

    /// The stored override; all-absent when the user exists but was never
    /// customized.
    pub fn override_for(&self, tenant_id: TenantId, user_id: UserId) -> DomainResult<UserOverride> {
        let record = self.load_user(tenant_id, user_id)?;
        Ok(UserOverride::from_blob(record.override_blob.as_ref()))
    }

    /// Field-level merge of `patch` into the stored override.
    pub fn set_override(
        &self,
        tenant_id: TenantId,
        actor: Role,
        user_id: UserId,
        patch: UserOverridePatch,
    ) -> DomainResult<UserOverride> {
        let record = self.authorize_edit(tenant_id, actor, user_id)?;
        validate_patch(&patch)?;

        let mut merged = UserOverride::from_blob(record.override_blob.as_ref());
        merged.apply(patch);
        self.persist(tenant_id, user_id, &merged)?;
        Ok(merged)
    }

    /// Replace the override with an all-absent blob whose `view_profile`
    /// is the target role's default profile id (not left null).
    pub fn reset_override(
        &self,
        tenant_id: TenantId,
        actor: Role,
        user_id: UserId,
    ) -> DomainResult<UserOverride> {
        let record = self.authorize_edit(tenant_id, actor, user_id)?;

        let reset = UserOverride {
            view_profile: Some(default_profile_for_role(record.role)),
            ..UserOverride::default()
        };
        self.persist(tenant_id, user_id, &reset)?;
        Ok(reset)
    }

    fn authorize_edit(
        &self,
        tenant_id: TenantId,
        actor: Role,
        user_id: UserId,
    ) -> DomainResult<UserRecord> {
        if !actor.can_edit_user_overrides() {
            warn!(%tenant_id, %user_id, actor = %actor, "rejected user override mutation");
            return Err(DomainError::forbidden(
                "only administrators and managers can edit user permissions",
            ));
        }

        let record = self.load_user(tenant_id, user_id)?;

        // Managers cannot alter administrator permissions.
        if actor == Role::Manager && record.role == Role::Admin {
            warn!(%tenant_id, %user_id, "manager attempted to edit an administrator");
            return Err(DomainError::forbidden(
                "managers cannot alter administrator permissions",
            ));
        }

        Ok(record)
    }

    fn persist(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        override_: &UserOverride,
    ) -> DomainResult<()> {
        let blob = serde_json::to_value(override_)
            .map_err(|e| DomainError::validation(format!("override not serializable: {e}")))?;
        self.directory.save_user_override(tenant_id, user_id, blob);
        Ok(())
    }
}

fn validate_patch(patch: &UserOverridePatch) -> DomainResult<()> {
    if let Some(percent) = patch.max_discount_percent {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DomainError::validation(format!(
                "max discount percent {percent} outside 0..=100"
            )));
        }
    }

    if let Some(page) = &patch.default_page {
        if !page.starts_with('/') {
            return Err(DomainError::validation(
                "default page must start with '/'",
            ));
        }
    }

    if let Some(capabilities) = &patch.custom_capabilities {
        let mut seen: Vec<Module> = Vec::new();
        for cap in capabilities {
            if seen.contains(&cap.module) {
                return Err(DomainError::validation(format!(
                    "duplicate custom capability entry for module {}",
                    cap.module
                )));
            }
            seen.push(cap.module);
        }
    }

    Ok(())
}
