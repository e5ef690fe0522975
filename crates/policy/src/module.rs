use serde::{Deserialize, Serialize};

/// UI/domain module of the ERP.
///
/// Capability lists and view profiles are keyed by module. The set is
/// closed; module names arriving as free-form strings (e.g. from a route
/// guard) go through [`Module::from_name`], which returns `None` for
/// anything unknown so that checks stay fail-closed.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Module {
    Dashboard,
    Pdv,
    Sales,
    Products,
    Categories,
    Customers,
    ServiceOrders,
    Financial,
    Invoices,
    Users,
    Settings,
}

impl Module {
    /// Every module, in display order.
    pub const ALL: [Module; 11] = [
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
        Module::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Pdv => "pdv",
            Module::Sales => "sales",
            Module::Products => "products",
            Module::Categories => "categories",
            Module::Customers => "customers",
            Module::ServiceOrders => "serviceOrders",
            Module::Financial => "financial",
            Module::Invoices => "invoices",
            Module::Users => "users",
            Module::Settings => "settings",
        }
    }

    /// Parse a module name. Unknown names yield `None`, never a fallback
    /// module; capability checks over an unknown module must deny.
    pub fn from_name(name: &str) -> Option<Module> {
        Module::ALL.iter().copied().find(|m| m.as_str() == name)
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
