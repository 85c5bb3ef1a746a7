//! User and role administration.
//!
//! Thin orchestration over the identity provider. Role assignment is the
//! delicate part: the provider offers no multi-role transaction, so the
//! add and remove steps are two fallible calls with explicit
//! partial-failure reporting and no rollback.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use crate::error::{CoreError, CoreResult, FieldError};
use crate::identity::{Caller, IdentityProvider, UserAccount};

/// A user together with their resolved role names.
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// One known role with a checked/unchecked flag for a specific user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCheckbox {
    pub role_name: String,
    pub selected: bool,
}

/// The full role-assignment form for one user.
#[derive(Debug, Clone)]
pub struct RoleAssignment {
    pub user_id: String,
    pub username: String,
    pub roles: Vec<RoleCheckbox>,
}

/// Administrator-only user and role management.
#[derive(Clone)]
pub struct RoleAdminService {
    identity: Arc<dyn IdentityProvider>,
}

impl RoleAdminService {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// List every user with their roles.
    pub async fn list_users_with_roles(&self, caller: &Caller) -> CoreResult<Vec<UserWithRoles>> {
        caller.require_admin()?;

        let mut result = Vec::new();
        for user in self.identity.list_users().await? {
            let roles = self.identity.roles_of(&user.id).await?;
            result.push(UserWithRoles {
                id: user.id,
                username: user.username,
                email: user.email,
                roles,
            });
        }
        Ok(result)
    }

    /// The role-assignment form: every known role, flagged for this user.
    pub async fn role_assignment(
        &self,
        caller: &Caller,
        user_id: &str,
    ) -> CoreResult<RoleAssignment> {
        caller.require_admin()?;

        let user = self.resolve_user(user_id).await?;
        let held: HashSet<String> = self.identity.roles_of(&user.id).await?.into_iter().collect();

        let roles = self
            .identity
            .all_roles()
            .await?
            .into_iter()
            .map(|role_name| {
                let selected = held.contains(&role_name);
                RoleCheckbox {
                    role_name,
                    selected,
                }
            })
            .collect();

        Ok(RoleAssignment {
            user_id: user.id,
            username: user.username,
            roles,
        })
    }

    /// Make the user's role set equal to `selected`.
    ///
    /// Missing selected roles are added first, then held-but-unselected
    /// roles are removed. A failing step aborts with the provider's
    /// reasons; changes already applied stay applied.
    pub async fn set_roles(
        &self,
        caller: &Caller,
        user_id: &str,
        selected: &HashSet<String>,
    ) -> CoreResult<()> {
        caller.require_admin()?;

        let user = self.resolve_user(user_id).await?;
        let current: HashSet<String> =
            self.identity.roles_of(&user.id).await?.into_iter().collect();

        let mut failures: Vec<FieldError> = Vec::new();

        for role in selected.difference(&current) {
            if let Err(e) = self.identity.add_role(&user.id, role).await {
                error!(user = %user.id, role = %role, "failed to add role: {e}");
                failures.push(FieldError::new("roles", format!("could not add {role}: {e}")));
            }
        }
        if !failures.is_empty() {
            return Err(CoreError::Validation(failures));
        }

        for role in current.difference(selected) {
            if let Err(e) = self.identity.remove_role(&user.id, role).await {
                error!(user = %user.id, role = %role, "failed to remove role: {e}");
                failures.push(FieldError::new(
                    "roles",
                    format!("could not remove {role}: {e}"),
                ));
            }
        }
        if !failures.is_empty() {
            return Err(CoreError::Validation(failures));
        }

        info!(user = %user.id, "roles updated");
        Ok(())
    }

    /// Create a new role.
    pub async fn create_role(&self, caller: &Caller, name: &str) -> CoreResult<()> {
        caller.require_admin()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::field("role_name", "is required"));
        }
        if self.identity.role_exists(name).await? {
            return Err(CoreError::AlreadyExists {
                entity: "role",
                name: name.to_string(),
            });
        }

        self.identity.create_role(name).await?;
        info!(role = %name, "role created");
        Ok(())
    }

    /// Delete a user account.
    pub async fn delete_user(&self, caller: &Caller, user_id: &str) -> CoreResult<()> {
        caller.require_admin()?;

        let user = self.resolve_user(user_id).await?;
        self.identity.delete_user(&user.id).await?;
        info!(user = %user.id, "user deleted");
        Ok(())
    }

    async fn resolve_user(&self, user_id: &str) -> CoreResult<UserAccount> {
        self.identity
            .find_user(user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("user", user_id))
    }
}
