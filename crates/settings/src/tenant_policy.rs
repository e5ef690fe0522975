//! Tenant-scoped policy/profile storage with ADMIN-only mutation.

use chrono::Utc;
use tracing::warn;

use vantage_core::{DomainError, DomainResult, TenantId};
use vantage_policy::{
    default_profile, default_role_policies, default_view_profiles, Module, Role, RolePolicy,
    ViewProfile, ViewProfileId,
};

use crate::documents::TenantSettings;
use crate::store::TenantSettingsRepository;

/// Persist and retrieve a tenant's role-policy and view-profile lists.
///
/// Both lists are replace-all blobs under the tenant's settings record:
/// absent means "use the compiled-in defaults", and replacement is
/// whole-list (no partial merge at the role/profile level). There is no
/// version token on replacement; concurrent admins are last-write-wins.
pub struct TenantPolicyStore<R> {
    repo: R,
}

impl<R: Clone> Clone for TenantPolicyStore<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> TenantPolicyStore<R>
where
    R: TenantSettingsRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    fn load(&self, tenant_id: TenantId) -> TenantSettings {
        match self.repo.load_settings(tenant_id) {
            None => TenantSettings::default(),
            Some(blob) => match serde_json::from_value(blob) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(%tenant_id, error = %err, "discarding undecodable tenant settings blob");
                    TenantSettings::default()
                }
            },
        }
    }

    fn persist(&self, tenant_id: TenantId, mut settings: TenantSettings) -> DomainResult<()> {
        settings.updated_at = Some(Utc::now());
        let blob = serde_json::to_value(&settings)
            .map_err(|e| DomainError::validation(format!("settings not serializable: {e}")))?;
        self.repo.save_settings(tenant_id, blob);
        Ok(())
    }

    /// The raw settings document (permission and non-permission sections).
    pub fn settings(&self, tenant_id: TenantId) -> TenantSettings {
        self.load(tenant_id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Role policies
    // ─────────────────────────────────────────────────────────────────────

    /// Tenant override if present, else the default policy table. Never
    /// fails: an absent or undecodable record means defaults.
    pub fn role_policies(&self, tenant_id: TenantId) -> Vec<RolePolicy> {
        self.load(tenant_id)
            .permissions
            .unwrap_or_else(default_role_policies)
    }

    /// The policy entry for one role, falling back to the VIEWER policy
    /// when the tenant's list carries no entry for it.
    pub fn role_policy(&self, tenant_id: TenantId, role: Role) -> RolePolicy {
        self.role_policies(tenant_id)
            .into_iter()
            .find(|p| p.role == role)
            .unwrap_or_else(|| vantage_policy::default_policy_for(Role::Viewer))
    }

    /// Replace the tenant's whole policy list. ADMIN only.
    pub fn set_role_policies(
        &self,
        tenant_id: TenantId,
        actor: Role,
        policies: Vec<RolePolicy>,
    ) -> DomainResult<Vec<RolePolicy>> {
        self.ensure_admin(tenant_id, actor, "update role permissions")?;
        validate_policies(&policies)?;

        let mut settings = self.load(tenant_id);
        settings.permissions = Some(policies.clone());
        self.persist(tenant_id, settings)?;
        Ok(policies)
    }

    /// Overwrite the tenant's policy list with exactly the default table.
    /// ADMIN only; idempotent.
    pub fn reset_role_policies(
        &self,
        tenant_id: TenantId,
        actor: Role,
    ) -> DomainResult<Vec<RolePolicy>> {
        self.ensure_admin(tenant_id, actor, "reset role permissions")?;

        let defaults = default_role_policies();
        let mut settings = self.load(tenant_id);
        settings.permissions = Some(defaults.clone());
        self.persist(tenant_id, settings)?;
        Ok(defaults)
    }

    // ─────────────────────────────────────────────────────────────────────
    // View profiles
    // ─────────────────────────────────────────────────────────────────────

    /// Tenant override if present, else the seeded profile list.
    pub fn view_profiles(&self, tenant_id: TenantId) -> Vec<ViewProfile> {
        self.load(tenant_id)
            .view_profiles
            .unwrap_or_else(default_view_profiles)
    }

    /// Resolve one profile by id against the tenant's effective list,
    /// falling back to the seeded table (and ultimately the `viewer`
    /// profile) for ids the list does not carry.
    pub fn view_profile(&self, tenant_id: TenantId, id: &ViewProfileId) -> ViewProfile {
        self.view_profiles(tenant_id)
            .into_iter()
            .find(|p| p.id == *id)
            .unwrap_or_else(|| default_profile(id))
    }

    /// Replace the tenant's whole profile list. ADMIN only.
    pub fn set_view_profiles(
        &self,
        tenant_id: TenantId,
        actor: Role,
        profiles: Vec<ViewProfile>,
    ) -> DomainResult<Vec<ViewProfile>> {
        self.ensure_admin(tenant_id, actor, "update view profiles")?;
        validate_profiles(&profiles)?;

        let mut settings = self.load(tenant_id);
        settings.view_profiles = Some(profiles.clone());
        self.persist(tenant_id, settings)?;
        Ok(profiles)
    }

    /// Overwrite the tenant's profile list with exactly the seeded
    /// profiles. ADMIN only; idempotent.
    pub fn reset_view_profiles(
        &self,
        tenant_id: TenantId,
        actor: Role,
    ) -> DomainResult<Vec<ViewProfile>> {
        self.ensure_admin(tenant_id, actor, "reset view profiles")?;

        let defaults = default_view_profiles();
        let mut settings = self.load(tenant_id);
        settings.view_profiles = Some(defaults.clone());
        self.persist(tenant_id, settings)?;
        Ok(defaults)
    }

    fn ensure_admin(&self, tenant_id: TenantId, actor: Role, action: &str) -> DomainResult<()> {
        if actor.can_administer_policies() {
            return Ok(());
        }
        warn!(%tenant_id, actor = %actor, action, "rejected tenant policy mutation");
        Err(DomainError::forbidden(format!(
            "only administrators can {action}"
        )))
    }
}

fn validate_policies(policies: &[RolePolicy]) -> DomainResult<()> {
    let mut seen_roles: Vec<Role> = Vec::new();
    for policy in policies {
        if seen_roles.contains(&policy.role) {
            return Err(DomainError::validation(format!(
                "duplicate policy entry for role {}",
                policy.role
            )));
        }
        seen_roles.push(policy.role);

        if policy.display_name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "policy for role {} has an empty display name",
                policy.role
            )));
        }

        if !(1..=4).contains(&policy.hierarchy_level) {
            return Err(DomainError::validation(format!(
                "policy for role {} has hierarchy level {} outside 1..=4",
                policy.role, policy.hierarchy_level
            )));
        }

        let mut seen_modules: Vec<Module> = Vec::new();
        for cap in &policy.capabilities {
            if seen_modules.contains(&cap.module) {
                return Err(DomainError::validation(format!(
                    "policy for role {} has duplicate capability entry for module {}",
                    policy.role, cap.module
                )));
            }
            seen_modules.push(cap.module);
        }
    }
    Ok(())
}

fn validate_profiles(profiles: &[ViewProfile]) -> DomainResult<()> {
    let mut seen_ids: Vec<&str> = Vec::new();
    for profile in profiles {
        let id = profile.id.as_str();
        if id.trim().is_empty() {
            return Err(DomainError::validation("view profile id cannot be empty"));
        }
        if seen_ids.contains(&id) {
            return Err(DomainError::validation(format!(
                "duplicate view profile id '{id}'"
            )));
        }
        seen_ids.push(id);

        if !profile.default_landing_page.starts_with('/') {
            return Err(DomainError::validation(format!(
                "view profile '{id}' landing page must start with '/'"
            )));
        }
    }
    Ok(())
}
