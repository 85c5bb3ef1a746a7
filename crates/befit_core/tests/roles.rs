//! Role administration: symmetric-difference assignment, partial failure,
//! and admin gating.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use befit_core::{
    Caller, CoreError, IdentityError, IdentityProvider, InMemoryIdentity, RoleAdminService,
    UserAccount,
};
use pretty_assertions::assert_eq;

fn role_set(roles: &[&str]) -> HashSet<String> {
    roles.iter().map(|r| r.to_string()).collect()
}

async fn identity_with_roles(roles: &[&str]) -> Arc<InMemoryIdentity> {
    let identity = Arc::new(InMemoryIdentity::new());
    for role in roles {
        identity.create_role(role).await.unwrap();
    }
    identity
}

#[tokio::test]
async fn assignment_applies_the_symmetric_difference() {
    let identity = identity_with_roles(&["A", "B", "C"]).await;
    let service = RoleAdminService::new(identity.clone());
    let admin = Caller::admin("admin-1");

    let user = identity.create_user("alice", "alice@test").await.unwrap();
    identity.add_role(&user.id, "A").await.unwrap();
    identity.add_role(&user.id, "B").await.unwrap();

    // {A, B} -> {B, C}: A removed, C added, B untouched.
    service
        .set_roles(&admin, &user.id, &role_set(&["B", "C"]))
        .await
        .unwrap();

    assert_eq!(identity.roles_of(&user.id).await.unwrap(), ["B", "C"]);
}

#[tokio::test]
async fn assignment_form_flags_held_roles() {
    let identity = identity_with_roles(&["A", "B"]).await;
    let service = RoleAdminService::new(identity.clone());
    let admin = Caller::admin("admin-1");

    let user = identity.create_user("bob", "bob@test").await.unwrap();
    identity.add_role(&user.id, "B").await.unwrap();

    let form = service.role_assignment(&admin, &user.id).await.unwrap();
    assert_eq!(form.username, "bob");

    let flags: Vec<_> = form
        .roles
        .iter()
        .map(|r| (r.role_name.as_str(), r.selected))
        .collect();
    assert_eq!(flags, [("A", false), ("B", true)]);
}

/// Wraps the in-memory provider and fails any mutation of one role name.
struct FlakyIdentity {
    inner: InMemoryIdentity,
    broken_role: String,
}

#[async_trait]
impl IdentityProvider for FlakyIdentity {
    async fn list_users(&self) -> Result<Vec<UserAccount>, IdentityError> {
        self.inner.list_users().await
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserAccount>, IdentityError> {
        self.inner.find_user(user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, IdentityError> {
        self.inner.find_user_by_email(email).await
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
    ) -> Result<UserAccount, IdentityError> {
        self.inner.create_user(username, email).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), IdentityError> {
        self.inner.delete_user(user_id).await
    }

    async fn roles_of(&self, user_id: &str) -> Result<Vec<String>, IdentityError> {
        self.inner.roles_of(user_id).await
    }

    async fn all_roles(&self) -> Result<Vec<String>, IdentityError> {
        self.inner.all_roles().await
    }

    async fn role_exists(&self, name: &str) -> Result<bool, IdentityError> {
        self.inner.role_exists(name).await
    }

    async fn create_role(&self, name: &str) -> Result<(), IdentityError> {
        self.inner.create_role(name).await
    }

    async fn add_role(&self, user_id: &str, role: &str) -> Result<(), IdentityError> {
        if role == self.broken_role {
            return Err(IdentityError::new("provider rejected the change"));
        }
        self.inner.add_role(user_id, role).await
    }

    async fn remove_role(&self, user_id: &str, role: &str) -> Result<(), IdentityError> {
        if role == self.broken_role {
            return Err(IdentityError::new("provider rejected the change"));
        }
        self.inner.remove_role(user_id, role).await
    }
}

#[tokio::test]
async fn partial_failure_surfaces_reasons_and_keeps_applied_changes() {
    let inner = InMemoryIdentity::new();
    for role in ["A", "B", "C"] {
        inner.create_role(role).await.unwrap();
    }
    let user = inner.create_user("carol", "carol@test").await.unwrap();
    inner.add_role(&user.id, "A").await.unwrap();

    // Removing A will fail; adding B and C succeeds first.
    let identity = Arc::new(FlakyIdentity {
        inner,
        broken_role: "A".to_string(),
    });
    let service = RoleAdminService::new(identity.clone());
    let admin = Caller::admin("admin-1");

    let err = service
        .set_roles(&admin, &user.id, &role_set(&["B", "C"]))
        .await
        .unwrap_err();
    match err {
        CoreError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "roles");
            assert!(errors[0].message.contains("remove A"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // The add step already ran; no rollback.
    assert_eq!(identity.roles_of(&user.id).await.unwrap(), ["A", "B", "C"]);
}

#[tokio::test]
async fn non_admin_is_forbidden() {
    let identity = identity_with_roles(&["A"]).await;
    let service = RoleAdminService::new(identity.clone());
    let user = identity.create_user("dave", "dave@test").await.unwrap();
    let caller = Caller::user("dave-caller");

    let err = service.list_users_with_roles(&caller).await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { .. }));

    let err = service
        .set_roles(&caller, &user.id, &role_set(&["A"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { .. }));

    let err = service.create_role(&caller, "New").await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { .. }));

    let err = service.delete_user(&caller, &user.id).await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { .. }));
}

#[tokio::test]
async fn create_role_rejects_duplicates_and_blank_names() {
    let identity = identity_with_roles(&["Existing"]).await;
    let service = RoleAdminService::new(identity);
    let admin = Caller::admin("admin-1");

    let err = service.create_role(&admin, "Existing").await.unwrap_err();
    assert!(matches!(err, CoreError::AlreadyExists { .. }));

    let err = service.create_role(&admin, "   ").await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    service.create_role(&admin, "Coach").await.unwrap();
}

#[tokio::test]
async fn delete_user_requires_an_existing_account() {
    let identity = identity_with_roles(&[]).await;
    let service = RoleAdminService::new(identity.clone());
    let admin = Caller::admin("admin-1");

    let err = service.delete_user(&admin, "ghost").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));

    let user = identity.create_user("erin", "erin@test").await.unwrap();
    service.delete_user(&admin, &user.id).await.unwrap();
    assert!(identity.find_user(&user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn user_listing_includes_roles() {
    let identity = identity_with_roles(&["Administrator", "User"]).await;
    let service = RoleAdminService::new(identity.clone());
    let admin = Caller::admin("admin-1");

    let alice = identity.create_user("alice", "alice@test").await.unwrap();
    identity.add_role(&alice.id, "Administrator").await.unwrap();
    identity.create_user("bob", "bob@test").await.unwrap();

    let users = service.list_users_with_roles(&admin).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "alice");
    assert_eq!(users[0].roles, ["Administrator"]);
    assert!(users[1].roles.is_empty());
}
