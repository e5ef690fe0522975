use serde::{Deserialize, Serialize};

use crate::ModuleCapability;

/// Coarse default permission bucket for a user.
///
/// The set is closed; free-form role strings (from tokens, stored blobs,
/// route parameters) go through [`Role::from_name`], which maps anything
/// unrecognized to `Viewer` rather than failing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Seller,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Seller, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Seller => "SELLER",
            Role::Viewer => "VIEWER",
        }
    }

    /// Parse a role name, falling back to `Viewer` for unrecognized input.
    pub fn from_name(name: &str) -> Role {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == name)
            .unwrap_or(Role::Viewer)
    }

    /// Whether this role may replace tenant-wide policy/profile lists.
    pub fn can_administer_policies(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role may edit per-user overrides at all. The extra
    /// MANAGER-cannot-target-ADMIN rule lives at the single call site that
    /// needs it, not here.
    pub fn can_edit_user_overrides(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role's default capability set, as stored per tenant.
///
/// `hierarchy_level` (1 = highest) is used only for display/ordering. It is
/// deliberately NOT enforced as an ACL lattice: nothing rejects a
/// lower-hierarchy role being granted more capabilities than a higher one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePolicy {
    pub role: Role,
    pub display_name: String,
    pub hierarchy_level: u8,
    pub capabilities: Vec<ModuleCapability>,
}

impl RolePolicy {
    pub fn new(
        role: Role,
        display_name: impl Into<String>,
        hierarchy_level: u8,
        capabilities: Vec<ModuleCapability>,
    ) -> Self {
        Self {
            role,
            display_name: display_name.into(),
            hierarchy_level,
            capabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_are_uppercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"SELLER\"");
    }

    #[test]
    fn unknown_role_name_falls_back_to_viewer() {
        assert_eq!(Role::from_name("SUPERUSER"), Role::Viewer);
        assert_eq!(Role::from_name(""), Role::Viewer);
        assert_eq!(Role::from_name("admin"), Role::Viewer); // case-sensitive
    }

    #[test]
    fn known_role_names_parse_exactly() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.as_str()), role);
        }
    }

    #[test]
    fn only_admin_administers_policies() {
        assert!(Role::Admin.can_administer_policies());
        assert!(!Role::Manager.can_administer_policies());
        assert!(!Role::Seller.can_administer_policies());
        assert!(!Role::Viewer.can_administer_policies());
    }

    #[test]
    fn admin_and_manager_edit_user_overrides() {
        assert!(Role::Admin.can_edit_user_overrides());
        assert!(Role::Manager.can_edit_user_overrides());
        assert!(!Role::Seller.can_edit_user_overrides());
        assert!(!Role::Viewer.can_edit_user_overrides());
    }
}
