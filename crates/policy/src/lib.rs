//! `vantage-policy` — pure permission-policy vocabulary and defaults.
//!
//! This crate is intentionally decoupled from storage and transport: it
//! defines the module/capability/role/profile types and the compiled-in
//! default tables, exposed only through pure lookup functions so no caller
//! can mutate shared state.

pub mod capability;
pub mod defaults;
pub mod module;
pub mod profile;
pub mod role;

pub use capability::{capability_for, CapabilityAction, ModuleCapability};
pub use defaults::{
    default_policy_for, default_profile, default_profile_for_role, default_role_policies,
    default_view_profiles,
};
pub use module::Module;
pub use profile::{ViewProfile, ViewProfileId};
pub use role::{Role, RolePolicy};
