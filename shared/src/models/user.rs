//! User Model

use serde::{Deserialize, Serialize};

/// Platform role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    RestaurantOwner,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::RestaurantOwner => "RESTAURANT_OWNER",
            Role::User => "USER",
        }
    }
}

/// Signed-in user as reported by `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    /// Raw role names; unknown names are kept but grant nothing
    #[serde(default)]
    pub roles: Vec<String>,
}

impl CurrentUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_owner(&self) -> bool {
        self.has_role(Role::RestaurantOwner)
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Admin user listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserRow {
    /// Roles for display; a user without roles is a plain USER
    pub fn effective_roles(&self) -> Vec<&str> {
        if self.roles.is_empty() {
            vec![Role::User.as_str()]
        } else {
            self.roles.iter().map(String::as_str).collect()
        }
    }
}
