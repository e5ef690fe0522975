//! `vantage-authz` — effective-permission resolution.
//!
//! The resolver merges the compiled-in default policy table, the tenant's
//! persisted overrides, and the per-user override blob into one effective
//! permission set per (tenant, user) pair. Resolution is recomputed on every call (strict read-after-write,
//! no cross-request cache) and capability checks fail closed.

pub mod effective;
pub mod resolver;
pub mod service;

pub use effective::{EffectivePermissions, PermissionSource};
pub use resolver::PermissionResolver;
pub use service::{
    OverrideUpdate, PermissionService, PolicyUpdate, ProfileUpdate, UserOverrideView,
};
