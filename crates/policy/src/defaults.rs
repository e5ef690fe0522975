//! Compiled-in default policy table and view profiles.
//!
//! These are the tenant-independent seeds: 4 role policies × 11 modules and
//! 7 view profiles. They are exposed only through pure functions returning
//! fresh values; there is no mutable singleton to corrupt. Lookups of
//! unknown roles/profiles return the VIEWER policy / `viewer` profile
//! rather than failing, so a resolver miss can never crash a route guard.

use crate::{Module, ModuleCapability, Role, RolePolicy, ViewProfile, ViewProfileId};

/// Default policy table: one [`RolePolicy`] per role, covering all modules.
pub fn default_role_policies() -> Vec<RolePolicy> {
    Role::ALL.iter().map(|r| default_policy_for(*r)).collect()
}

/// Default policy for a single role. Total over the enum; combined with
/// [`Role::from_name`] this gives unknown role strings the VIEWER policy.
pub fn default_policy_for(role: Role) -> RolePolicy {
    match role {
        Role::Admin => RolePolicy::new(
            Role::Admin,
            "Administrator",
            1,
            Module::ALL.iter().map(|m| ModuleCapability::all(*m)).collect(),
        ),
        Role::Manager => RolePolicy::new(Role::Manager, "Manager", 2, manager_capabilities()),
        Role::Seller => RolePolicy::new(Role::Seller, "Salesperson", 3, seller_capabilities()),
        Role::Viewer => RolePolicy::new(Role::Viewer, "Viewer", 4, viewer_capabilities()),
    }
}

fn manager_capabilities() -> Vec<ModuleCapability> {
    vec![
        ModuleCapability::new(Module::Dashboard, true, false, false, false, true),
        ModuleCapability::new(Module::Pdv, true, true, true, false, true),
        ModuleCapability::new(Module::Sales, true, true, true, false, true),
        ModuleCapability::all(Module::Products),
        ModuleCapability::all(Module::Categories),
        ModuleCapability::all(Module::Customers),
        ModuleCapability::all(Module::ServiceOrders),
        ModuleCapability::new(Module::Financial, true, true, true, false, true),
        ModuleCapability::new(Module::Invoices, true, true, true, false, true),
        ModuleCapability::new(Module::Users, true, true, true, false, false),
        ModuleCapability::view_only(Module::Settings),
    ]
}

fn seller_capabilities() -> Vec<ModuleCapability> {
    vec![
        ModuleCapability::view_only(Module::Dashboard),
        ModuleCapability::new(Module::Pdv, true, true, false, false, false),
        ModuleCapability::new(Module::Sales, true, true, false, false, false),
        ModuleCapability::view_only(Module::Products),
        ModuleCapability::view_only(Module::Categories),
        ModuleCapability::new(Module::Customers, true, true, true, false, false),
        ModuleCapability::new(Module::ServiceOrders, true, true, false, false, false),
        ModuleCapability::none(Module::Financial),
        ModuleCapability::none(Module::Invoices),
        ModuleCapability::none(Module::Users),
        ModuleCapability::none(Module::Settings),
    ]
}

fn viewer_capabilities() -> Vec<ModuleCapability> {
    vec![
        ModuleCapability::view_only(Module::Dashboard),
        ModuleCapability::none(Module::Pdv),
        ModuleCapability::view_only(Module::Sales),
        ModuleCapability::view_only(Module::Products),
        ModuleCapability::view_only(Module::Categories),
        ModuleCapability::view_only(Module::Customers),
        ModuleCapability::view_only(Module::ServiceOrders),
        ModuleCapability::view_only(Module::Financial),
        ModuleCapability::view_only(Module::Invoices),
        ModuleCapability::none(Module::Users),
        ModuleCapability::none(Module::Settings),
    ]
}

/// The 7 seeded view profiles.
pub fn default_view_profiles() -> Vec<ViewProfile> {
    vec![
        ViewProfile::new(
            ViewProfileId::FULL,
            "Full access",
            "Every module, including user and settings administration.",
            Module::ALL,
            "/dashboard",
        ),
        ViewProfile::new(
            ViewProfileId::MANAGER,
            "Store manager",
            "Operational and financial modules plus user management.",
            [
                Module::Dashboard,
                Module::Pdv,
                Module::Sales,
                Module::Products,
                Module::Categories,
                Module::Customers,
                Module::ServiceOrders,
                Module::Financial,
                Module::Invoices,
                Module::Users,
            ],
            "/dashboard",
        ),
        ViewProfile::new(
            ViewProfileId::SALES,
            "Sales",
            "Point of sale and the catalog/customer modules behind it.",
            [
                Module::Dashboard,
                Module::Pdv,
                Module::Sales,
                Module::Products,
                Module::Categories,
                Module::Customers,
            ],
            "/dashboard/pdv",
        ),
        ViewProfile::new(
            ViewProfileId::STORE,
            "Store operations",
            "Front-of-store modules including service orders and invoices.",
            [
                Module::Dashboard,
                Module::Pdv,
                Module::Sales,
                Module::Products,
                Module::Categories,
                Module::Customers,
                Module::ServiceOrders,
                Module::Invoices,
            ],
            "/dashboard/pdv",
        ),
        ViewProfile::new(
            ViewProfileId::FINANCIAL,
            "Financial",
            "Ledger, invoicing and the customers they reference.",
            [
                Module::Dashboard,
                Module::Financial,
                Module::Invoices,
                Module::Customers,
            ],
            "/dashboard/financial",
        ),
        ViewProfile::new(
            ViewProfileId::VIEWER,
            "Read only",
            "Reporting views without any point-of-sale access.",
            [
                Module::Dashboard,
                Module::Sales,
                Module::Products,
                Module::Customers,
            ],
            "/dashboard",
        ),
        ViewProfile::new(
            ViewProfileId::CUSTOM,
            "Custom",
            "Placeholder selected for users carrying a custom permission set.",
            [Module::Dashboard],
            "/dashboard",
        ),
    ]
}

/// Look up a seeded profile by id, falling back to the `viewer` profile for
/// unknown ids.
pub fn default_profile(id: &ViewProfileId) -> ViewProfile {
    default_view_profiles()
        .into_iter()
        .find(|p| p.id == *id)
        .unwrap_or_else(viewer_profile)
}

fn viewer_profile() -> ViewProfile {
    default_view_profiles()
        .into_iter()
        .find(|p| p.id == ViewProfileId::VIEWER)
        .unwrap_or_else(|| {
            ViewProfile::new(
                ViewProfileId::VIEWER,
                "Read only",
                "",
                [Module::Dashboard],
                "/dashboard",
            )
        })
}

/// Fixed role → default view profile mapping.
pub fn default_profile_for_role(role: Role) -> ViewProfileId {
    match role {
        Role::Admin => ViewProfileId::FULL,
        Role::Manager => ViewProfileId::MANAGER,
        Role::Seller => ViewProfileId::SALES,
        Role::Viewer => ViewProfileId::VIEWER,
    }
}
