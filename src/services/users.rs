//! User directory: registration, login, profile edits and follow
//! relationships.

use async_trait::async_trait;
use rusqlite::Connection;
use serde::Deserialize;
use thiserror::Error;

use crate::db::models::{User, UserDto};
use crate::db::{Collection, StoreError};
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("A user cannot follow themselves")]
    SelfFollow,

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identity lookups other services denormalize from.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn resolve(&self, user_id: &str) -> Result<Option<User>, StoreError>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUser {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub profile_image: Option<String>,
    pub mobile_number: Option<String>,
    pub source: Option<String>,
}

/// Profile edit; absent fields are left as stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image: Option<String>,
    pub mobile_number: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    users: Collection<User>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: DbPool, bcrypt_cost: u32) -> Self {
        Self {
            users: Collection::new(pool),
            bcrypt_cost,
        }
    }

    pub fn register(&self, input: RegisterUser) -> Result<UserDto, UserError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(UserError::Validation("Email is required".into()));
        }
        if input.password.is_empty() {
            return Err(UserError::Validation("Password is required".into()));
        }
        if self.find_by_email(&email)?.is_some() {
            return Err(UserError::EmailTaken(email));
        }

        let mut user = User {
            id: String::new(),
            name: input.name,
            first_name: input.first_name,
            last_name: input.last_name,
            email,
            password: bcrypt::hash(&input.password, self.bcrypt_cost)?,
            profile_image: input.profile_image,
            mobile_number: input.mobile_number,
            source: Some(input.source.unwrap_or_else(|| "local".to_string())),
            followed_users: Vec::new(),
            following_users: Vec::new(),
        };
        // The unique email index settles concurrent registrations
        match self.users.save(&mut user) {
            Err(e) if e.is_constraint_violation() => return Err(UserError::EmailTaken(user.email)),
            result => result?,
        }

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(UserDto::from(user))
    }

    pub fn get(&self, user_id: &str) -> Result<UserDto, UserError> {
        Ok(UserDto::from(self.require(user_id)?))
    }

    pub fn list(&self) -> Result<Vec<UserDto>, UserError> {
        Ok(self.users.find_all()?.iter().map(UserDto::from).collect())
    }

    pub fn login(&self, email: &str, password: &str) -> Result<UserDto, UserError> {
        let email = email.trim().to_lowercase();
        let user = self
            .find_by_email(&email)?
            .ok_or_else(|| UserError::NotFound(email.clone()))?;

        if !bcrypt::verify(password, &user.password).unwrap_or(false) {
            tracing::debug!(user_id = %user.id, "Login rejected");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(UserDto::from(user))
    }

    /// `user_id` starts following `followed_user_id`. Returns the follower.
    pub fn follow(&self, user_id: &str, followed_user_id: &str) -> Result<UserDto, UserError> {
        if user_id == followed_user_id {
            return Err(UserError::SelfFollow);
        }

        // Both sides change together or not at all
        let follower = self.users.transaction(|tx| {
            let mut follower = self.require_on(tx, user_id)?;
            let mut followee = self.require_on(tx, followed_user_id)?;

            if !follower.followed_users.iter().any(|id| id == followed_user_id) {
                follower.followed_users.push(followed_user_id.to_string());
                self.users.save_on(tx, &mut follower)?;
            }
            if !followee.following_users.iter().any(|id| id == user_id) {
                followee.following_users.push(user_id.to_string());
                self.users.save_on(tx, &mut followee)?;
            }

            Ok::<_, UserError>(follower)
        })?;

        tracing::info!(user_id, followed_user_id, "User followed");
        Ok(UserDto::from(follower))
    }

    pub fn update_profile(&self, user_id: &str, edit: UpdateProfile) -> Result<UserDto, UserError> {
        let user = self.users.transaction(|tx| {
            let mut user = self.require_on(tx, user_id)?;

            if let Some(name) = edit.name {
                user.name = Some(name);
            }
            if let Some(first_name) = edit.first_name {
                user.first_name = Some(first_name);
            }
            if let Some(last_name) = edit.last_name {
                user.last_name = Some(last_name);
            }
            if let Some(profile_image) = edit.profile_image {
                user.profile_image = Some(profile_image);
            }
            if let Some(mobile_number) = edit.mobile_number {
                user.mobile_number = Some(mobile_number);
            }

            self.users.save_on(tx, &mut user)?;
            Ok::<_, UserError>(user)
        })?;

        tracing::info!(user_id, "Updated user profile");
        Ok(UserDto::from(user))
    }

    fn require(&self, user_id: &str) -> Result<User, UserError> {
        self.users
            .find_by_id(user_id)?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()))
    }

    fn require_on(&self, conn: &Connection, user_id: &str) -> Result<User, UserError> {
        self.users
            .find_by_id_on(conn, user_id)?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_by_field("email", email)?.into_iter().next())
    }
}

#[async_trait]
impl UserDirectory for UserService {
    async fn resolve(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        self.users.find_by_id(user_id)
    }
}
