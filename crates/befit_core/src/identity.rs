//! Identity-provider abstraction.
//!
//! Authentication itself is an external collaborator: the core only sees an
//! opaque user id plus role membership, and asks the provider to mutate
//! roles and accounts on its behalf. Every service call takes an explicit
//! [`Caller`]; nothing reads identity out of ambient request state.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};

/// Role required for catalog and user administration.
pub const ROLE_ADMINISTRATOR: &str = "Administrator";

/// Default role for ordinary accounts.
pub const ROLE_USER: &str = "User";

/// An authenticated caller: stable user id plus resolved role names.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: String,
    pub roles: HashSet<String>,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, roles: impl IntoIterator<Item = String>) -> Self {
        Self {
            user_id: user_id.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// A caller holding only the default User role.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::new(user_id, [ROLE_USER.to_string()])
    }

    /// A caller holding the Administrator role.
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(
            user_id,
            [ROLE_ADMINISTRATOR.to_string(), ROLE_USER.to_string()],
        )
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(ROLE_ADMINISTRATOR)
    }

    /// Gate an operation on the Administrator role.
    pub fn require_admin(&self) -> CoreResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::Forbidden {
                reason: "requires the Administrator role",
            })
        }
    }
}

/// A user account as the identity provider reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Failure reported by the identity provider.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{0}")]
pub struct IdentityError(pub String);

impl IdentityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The capabilities the core needs from the external identity system.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserAccount>, IdentityError>;

    async fn find_user(&self, user_id: &str) -> Result<Option<UserAccount>, IdentityError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, IdentityError>;

    async fn create_user(&self, username: &str, email: &str)
        -> Result<UserAccount, IdentityError>;

    async fn delete_user(&self, user_id: &str) -> Result<(), IdentityError>;

    /// Role names currently held by the user.
    async fn roles_of(&self, user_id: &str) -> Result<Vec<String>, IdentityError>;

    /// Every role known to the provider.
    async fn all_roles(&self) -> Result<Vec<String>, IdentityError>;

    async fn role_exists(&self, name: &str) -> Result<bool, IdentityError>;

    async fn create_role(&self, name: &str) -> Result<(), IdentityError>;

    async fn add_role(&self, user_id: &str, role: &str) -> Result<(), IdentityError>;

    async fn remove_role(&self, user_id: &str, role: &str) -> Result<(), IdentityError>;
}

/// In-memory identity provider for tests and embedding demos.
#[derive(Debug, Default)]
pub struct InMemoryIdentity {
    state: RwLock<IdentityState>,
}

#[derive(Debug, Default)]
struct IdentityState {
    users: HashMap<String, UserAccount>,
    roles: HashSet<String>,
    user_roles: HashMap<String, HashSet<String>>,
    next_id: u64,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    async fn list_users(&self) -> Result<Vec<UserAccount>, IdentityError> {
        let state = self.state.read().await;
        let mut users: Vec<_> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserAccount>, IdentityError> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, IdentityError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
    ) -> Result<UserAccount, IdentityError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == email) {
            return Err(IdentityError::new(format!(
                "user already exists: {email}"
            )));
        }
        state.next_id += 1;
        let user = UserAccount {
            id: format!("user-{}", state.next_id),
            username: username.to_string(),
            email: email.to_string(),
        };
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), IdentityError> {
        let mut state = self.state.write().await;
        state
            .users
            .remove(user_id)
            .ok_or_else(|| IdentityError::new(format!("unknown user: {user_id}")))?;
        state.user_roles.remove(user_id);
        Ok(())
    }

    async fn roles_of(&self, user_id: &str) -> Result<Vec<String>, IdentityError> {
        let state = self.state.read().await;
        let mut roles: Vec<_> = state
            .user_roles
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        roles.sort();
        Ok(roles)
    }

    async fn all_roles(&self) -> Result<Vec<String>, IdentityError> {
        let state = self.state.read().await;
        let mut roles: Vec<_> = state.roles.iter().cloned().collect();
        roles.sort();
        Ok(roles)
    }

    async fn role_exists(&self, name: &str) -> Result<bool, IdentityError> {
        Ok(self.state.read().await.roles.contains(name))
    }

    async fn create_role(&self, name: &str) -> Result<(), IdentityError> {
        let mut state = self.state.write().await;
        if !state.roles.insert(name.to_string()) {
            return Err(IdentityError::new(format!("role already exists: {name}")));
        }
        Ok(())
    }

    async fn add_role(&self, user_id: &str, role: &str) -> Result<(), IdentityError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(user_id) {
            return Err(IdentityError::new(format!("unknown user: {user_id}")));
        }
        if !state.roles.contains(role) {
            return Err(IdentityError::new(format!("unknown role: {role}")));
        }
        state
            .user_roles
            .entry(user_id.to_string())
            .or_default()
            .insert(role.to_string());
        Ok(())
    }

    async fn remove_role(&self, user_id: &str, role: &str) -> Result<(), IdentityError> {
        let mut state = self.state.write().await;
        if let Some(roles) = state.user_roles.get_mut(user_id) {
            roles.remove(role);
        }
        Ok(())
    }
}
