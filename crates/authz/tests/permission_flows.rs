//! End-to-end permission flows over in-memory collaborators.
//!
//! These exercise the full service surface the way the surrounding CRUD
//! layer does: seed users, mutate tenant/user settings, resolve, check.

use std::sync::Arc;

use vantage_authz::{PermissionService, PermissionSource};
use vantage_core::{DomainError, TenantId, UserId};
use vantage_policy::{
    default_policy_for, default_role_policies, default_view_profiles, Module, ModuleCapability,
    Role, ViewProfileId,
};
use vantage_settings::{
    InMemoryTenantSettings, InMemoryUserDirectory, UserOverridePatch,
};

type Service = PermissionService<Arc<InMemoryUserDirectory>, Arc<InMemoryTenantSettings>>;

struct World {
    service: Service,
    directory: Arc<InMemoryUserDirectory>,
    tenant_id: TenantId,
}

impl World {
    fn new() -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let repository = Arc::new(InMemoryTenantSettings::new());
        Self {
            service: PermissionService::new(Arc::clone(&directory), repository),
            directory,
            tenant_id: TenantId::new(),
        }
    }

    fn user(&self, role: Role) -> UserId {
        let user_id = UserId::new();
        self.directory.insert_user(self.tenant_id, user_id, role);
        user_id
    }
}

#[test]
fn fresh_tenant_reads_exactly_the_default_tables() {
    let world = World::new();

    assert_eq!(
        world.service.permissions(world.tenant_id),
        default_role_policies()
    );
    assert_eq!(
        world.service.view_profiles(world.tenant_id),
        default_view_profiles()
    );
}

#[test]
fn seller_resolution_then_custom_override_switches_the_source() {
    let world = World::new();
    let seller = world.user(Role::Seller);

    // Untouched tenant, untouched user: the role path.
    let before = world
        .service
        .effective_permissions(world.tenant_id, seller)
        .unwrap();
    assert_eq!(before.source, PermissionSource::Role);
    assert_eq!(before.view_profile, ViewProfileId::SALES);
    assert_eq!(before.default_page, "/dashboard/pdv");
    assert_eq!(
        before.allowed_modules,
        [
            Module::Dashboard,
            Module::Pdv,
            Module::Sales,
            Module::Products,
            Module::Categories,
            Module::Customers,
        ]
        .into_iter()
        .collect()
    );
    assert!(before.can_apply_discounts);
    assert_eq!(before.max_discount_percent, 15.0);
    assert!(!before.can_process_refunds);
    assert!(before.can_access_reports);
    assert!(before.can_export_data);

    // An admin grants a single-module custom set.
    let custom = vec![ModuleCapability::new(
        Module::Financial,
        true,
        false,
        false,
        false,
        false,
    )];
    world
        .service
        .update_user_permissions(
            world.tenant_id,
            Role::Admin,
            seller,
            UserOverridePatch {
                use_custom_permissions: Some(true),
                custom_capabilities: Some(custom.clone()),
                ..UserOverridePatch::default()
            },
        )
        .unwrap();

    // Read-your-writes: the next resolution reflects the change.
    let after = world
        .service
        .effective_permissions(world.tenant_id, seller)
        .unwrap();
    assert_eq!(after.source, PermissionSource::Custom);
    assert_eq!(after.capabilities, custom);
    assert!(!after.can_process_refunds); // literal default, not role default

    assert!(world
        .service
        .has_capability(world.tenant_id, seller, "financial", "view"));
    assert!(!world
        .service
        .has_capability(world.tenant_id, seller, "pdv", "create"));
}

#[test]
fn reset_permissions_is_idempotent() {
    let world = World::new();

    world
        .service
        .update_permissions(
            world.tenant_id,
            Role::Admin,
            vec![default_policy_for(Role::Admin)],
        )
        .unwrap();

    let first = world
        .service
        .reset_permissions_to_default(world.tenant_id, Role::Admin)
        .unwrap();
    let second = world
        .service
        .reset_permissions_to_default(world.tenant_id, Role::Admin)
        .unwrap();

    assert_eq!(first.permissions, second.permissions);
    assert_eq!(first.permissions, default_role_policies());
}

#[test]
fn manager_cannot_replace_policies_and_state_is_untouched() {
    let world = World::new();
    let before = world.service.permissions(world.tenant_id);

    let err = world
        .service
        .update_permissions(
            world.tenant_id,
            Role::Manager,
            vec![default_policy_for(Role::Admin)],
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    assert_eq!(world.service.permissions(world.tenant_id), before);
}

#[test]
fn manager_can_edit_sellers_but_not_admins() {
    let world = World::new();
    let admin = world.user(Role::Admin);
    let seller = world.user(Role::Seller);

    let patch = UserOverridePatch {
        can_apply_discounts: Some(false),
        ..UserOverridePatch::default()
    };

    let err = world
        .service
        .update_user_permissions(world.tenant_id, Role::Manager, admin, patch.clone())
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    world
        .service
        .update_user_permissions(world.tenant_id, Role::Manager, seller, patch)
        .unwrap();

    let effective = world
        .service
        .effective_permissions(world.tenant_id, seller)
        .unwrap();
    assert!(!effective.can_apply_discounts);
}

#[test]
fn partial_patch_merges_while_list_replacement_does_not() {
    let world = World::new();
    let seller = world.user(Role::Seller);

    // Two patches; the second touches one field only.
    world
        .service
        .update_user_permissions(
            world.tenant_id,
            Role::Admin,
            seller,
            UserOverridePatch {
                view_profile: Some(ViewProfileId::STORE),
                ..UserOverridePatch::default()
            },
        )
        .unwrap();
    let merged = world
        .service
        .update_user_permissions(
            world.tenant_id,
            Role::Admin,
            seller,
            UserOverridePatch {
                max_discount_percent: Some(20.0),
                ..UserOverridePatch::default()
            },
        )
        .unwrap();
    assert_eq!(merged.stored.view_profile, Some(ViewProfileId::STORE));
    assert_eq!(merged.stored.max_discount_percent, Some(20.0));

    // Whole-list semantics on the tenant side: a one-entry list replaces
    // all four default policies.
    let update = world
        .service
        .update_permissions(
            world.tenant_id,
            Role::Admin,
            vec![default_policy_for(Role::Viewer)],
        )
        .unwrap();
    assert_eq!(update.permissions.len(), 1);
    assert_eq!(world.service.permissions(world.tenant_id).len(), 1);
}

#[test]
fn unknown_module_checks_fail_closed_everywhere() {
    let world = World::new();
    let admin = world.user(Role::Admin);

    assert!(!world
        .service
        .has_capability(world.tenant_id, admin, "nonexistent-module", "view"));
    assert!(!world
        .service
        .check_permission(world.tenant_id, Role::Admin, "nonexistent-module", "view"));
}

#[test]
fn reset_user_permissions_restores_the_role_default_profile() {
    let world = World::new();
    let manager = world.user(Role::Manager);

    world
        .service
        .update_user_permissions(
            world.tenant_id,
            Role::Admin,
            manager,
            UserOverridePatch {
                use_custom_permissions: Some(true),
                custom_capabilities: Some(vec![ModuleCapability::all(Module::Pdv)]),
                default_page: Some("/dashboard/pdv".to_string()),
                ..UserOverridePatch::default()
            },
        )
        .unwrap();

    let reset = world
        .service
        .reset_user_permissions(world.tenant_id, Role::Admin, manager)
        .unwrap();
    assert_eq!(reset.stored.view_profile, Some(ViewProfileId::MANAGER));
    assert!(!reset.stored.use_custom_permissions);
    assert!(reset.stored.custom_capabilities.is_none());
    assert!(reset.stored.default_page.is_none());

    // Back on the role path.
    let effective = world
        .service
        .effective_permissions(world.tenant_id, manager)
        .unwrap();
    assert_eq!(effective.source, PermissionSource::Role);
    assert_eq!(effective.view_profile, ViewProfileId::MANAGER);
}

#[test]
fn tenants_do_not_observe_each_others_settings() {
    let world = World::new();
    let other_tenant = TenantId::new();

    world
        .service
        .update_permissions(
            world.tenant_id,
            Role::Admin,
            vec![default_policy_for(Role::Admin)],
        )
        .unwrap();

    assert_eq!(world.service.permissions(world.tenant_id).len(), 1);
    assert_eq!(
        world.service.permissions(other_tenant),
        default_role_policies()
    );
}

#[test]
fn user_lookup_across_tenants_is_not_found() {
    let world = World::new();
    let seller = world.user(Role::Seller);
    let other_tenant = TenantId::new();

    let err = world
        .service
        .effective_permissions(other_tenant, seller)
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}
