//! User model for storage and API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// Shipping/contact address embedded in the user document.
///
/// At most one per user; add/update overwrite the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub pin_code: Option<String>,
}

/// User account stored in Firestore (document ID = `id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Argon2 hash, never the plaintext
    pub password: String,
    pub role: Role,
    /// Login is refused until the emailed code has been confirmed
    pub is_verified: bool,
    /// 6-digit verification code; stays on the document after confirmation
    pub code: Option<u32>,
    /// Profile picture URL in the image store
    pub profile_image: Option<String>,
    pub address: Option<Address>,
    /// When the account was created (RFC 3339)
    pub created_at: String,
}

impl User {
    /// Overwrite the embedded address wholesale.
    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Clear the embedded address entirely.
    pub fn clear_address(&mut self) {
        self.address = None;
    }

    /// Apply a profile patch: only provided fields change.
    ///
    /// The password field must already be hashed by the caller.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password = password_hash;
        }
        if let Some(profile_image) = patch.profile_image {
            self.profile_image = Some(profile_image);
        }
    }
}

/// Optional-field patch for profile updates.
///
/// `None` means "leave unchanged"; an empty string is an explicit value.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
    pub profile_image: Option<String>,
}

/// User shape returned to clients: no password hash, no verification code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    pub profile_image: Option<String>,
    pub address: Option<Address>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_verified: user.is_verified,
            profile_image: user.profile_image,
            address: user.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "$argon2id$fake".to_string(),
            role: Role::User,
            is_verified: true,
            code: None,
            profile_image: None,
            address: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_address_overwrite_is_wholesale() {
        let mut user = test_user();
        user.set_address(Address {
            city: Some("Pune".to_string()),
            country: Some("India".to_string()),
            phone: Some("12345".to_string()),
            pin_code: Some("411001".to_string()),
        });

        // Updating with only a city must drop the other three fields,
        // not merge with the prior value.
        user.set_address(Address {
            city: Some("Mumbai".to_string()),
            country: None,
            phone: None,
            pin_code: None,
        });

        let address = user.address.expect("address present");
        assert_eq!(address.city.as_deref(), Some("Mumbai"));
        assert_eq!(address.country, None);
        assert_eq!(address.phone, None);
        assert_eq!(address.pin_code, None);
    }

    #[test]
    fn test_clear_address() {
        let mut user = test_user();
        user.set_address(Address {
            city: Some("Pune".to_string()),
            country: None,
            phone: None,
            pin_code: None,
        });
        user.clear_address();
        assert!(user.address.is_none());
    }

    #[test]
    fn test_patch_only_touches_provided_fields() {
        let mut user = test_user();
        user.apply_patch(UserPatch {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        });

        assert_eq!(user.email, "b@x.com");
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.password, "$argon2id$fake");
    }

    #[test]
    fn test_public_user_has_no_secret_material() {
        let user = test_user();
        let public: PublicUser = user.into();
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("code").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert!("root".parse::<Role>().is_err());
    }
}
