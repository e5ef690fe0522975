//! Collaborator boundary: user directory and tenant settings persistence.
//!
//! Both collaborators speak whole JSON blobs; decoding into the typed
//! documents happens in the stores built on top. In-memory implementations
//! back tests and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use vantage_core::{TenantId, UserId};
use vantage_policy::Role;

/// What the user-management collaborator knows about one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub user_id: UserId,
    pub role: Role,
    /// Stored override blob; `None` when the user was never customized.
    pub override_blob: Option<serde_json::Value>,
}

/// User-management collaborator: role lookup and override write-back.
pub trait UserDirectory: Send + Sync {
    /// Load a user within a tenant. `None` means the user does not exist
    /// in that tenant (cross-tenant lookups must not leak records).
    fn load_user(&self, tenant_id: TenantId, user_id: UserId) -> Option<UserRecord>;

    /// Persist a user's override blob (whole-blob replacement).
    fn save_user_override(&self, tenant_id: TenantId, user_id: UserId, blob: serde_json::Value);
}

/// Tenant/settings persistence collaborator: one opaque blob per tenant.
pub trait TenantSettingsRepository: Send + Sync {
    /// Load the tenant's settings blob. `None` means the tenant has never
    /// persisted settings (callers fall back to defaults).
    fn load_settings(&self, tenant_id: TenantId) -> Option<serde_json::Value>;

    /// Persist the tenant's settings blob (whole-blob replacement).
    fn save_settings(&self, tenant_id: TenantId, blob: serde_json::Value);
}

impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    fn load_user(&self, tenant_id: TenantId, user_id: UserId) -> Option<UserRecord> {
        (**self).load_user(tenant_id, user_id)
    }

    fn save_user_override(&self, tenant_id: TenantId, user_id: UserId, blob: serde_json::Value) {
        (**self).save_user_override(tenant_id, user_id, blob)
    }
}

impl<R> TenantSettingsRepository for Arc<R>
where
    R: TenantSettingsRepository + ?Sized,
{
    fn load_settings(&self, tenant_id: TenantId) -> Option<serde_json::Value> {
        (**self).load_settings(tenant_id)
    }

    fn save_settings(&self, tenant_id: TenantId, blob: serde_json::Value) {
        (**self).save_settings(tenant_id, blob)
    }
}

/// In-memory user directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<HashMap<(TenantId, UserId), UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with a role and no stored override.
    pub fn insert_user(&self, tenant_id: TenantId, user_id: UserId, role: Role) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(
                (tenant_id, user_id),
                UserRecord {
                    user_id,
                    role,
                    override_blob: None,
                },
            );
        }
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn load_user(&self, tenant_id: TenantId, user_id: UserId) -> Option<UserRecord> {
        let map = self.inner.read().ok()?;
        map.get(&(tenant_id, user_id)).cloned()
    }

    fn save_user_override(&self, tenant_id: TenantId, user_id: UserId, blob: serde_json::Value) {
        if let Ok(mut map) = self.inner.write() {
            if let Some(record) = map.get_mut(&(tenant_id, user_id)) {
                record.override_blob = Some(blob);
            }
        }
    }
}

/// In-memory tenant settings repository for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTenantSettings {
    inner: RwLock<HashMap<TenantId, serde_json::Value>>,
}

impl InMemoryTenantSettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TenantSettingsRepository for InMemoryTenantSettings {
    fn load_settings(&self, tenant_id: TenantId) -> Option<serde_json::Value> {
        let map = self.inner.read().ok()?;
        map.get(&tenant_id).cloned()
    }

    fn save_settings(&self, tenant_id: TenantId, blob: serde_json::Value) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(tenant_id, blob);
        }
    }
}
