use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Document;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub profile_image: Option<String>,
    pub mobile_number: Option<String>,
    pub source: Option<String>,
    /// Users this user follows.
    pub followed_users: Vec<String>,
    /// Users following this user.
    pub following_users: Vec<String>,
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Public view of a user: no password, follow counts derived from the lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub profile_image: Option<String>,
    pub mobile_number: Option<String>,
    pub source: Option<String>,
    pub followed_users: Vec<String>,
    pub following_users: Vec<String>,
    pub followers_count: usize,
    pub following_count: usize,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
            mobile_number: user.mobile_number.clone(),
            source: user.source.clone(),
            followed_users: user.followed_users.clone(),
            following_users: user.following_users.clone(),
            followers_count: user.following_users.len(),
            following_count: user.followed_users.len(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub progress_id: Option<String>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub user_profile: Option<String>,
    pub milestone: Option<String>,
    pub description: Option<String>,
    pub progress_date: Option<String>,
    pub skill_category: Option<String>,
    pub completion_percentage: i32,
    pub learning_resources: Option<String>,
}

impl Progress {
    /// Copy the owner's identity and display fields onto the record.
    pub fn snapshot_owner(&mut self, owner: &User) {
        self.user_id = Some(owner.id.clone());
        self.username = owner.name.clone();
        self.user_profile = owner.profile_image.clone();
    }
}

impl Document for Progress {
    const COLLECTION: &'static str = "progress";

    fn id(&self) -> Option<&str> {
        self.progress_id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.progress_id = Some(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillExchange {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub user_profile: Option<String>,
    pub skill_offered: Option<String>,
    pub skill_requested: Option<String>,
    pub description: Option<String>,
    pub exchange_date: Option<String>,
    pub preferred_mode: Option<String>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
}

impl Document for SkillExchange {
    const COLLECTION: &'static str = "skill_exchange";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePost {
    pub id: String,
    pub user_id: String,
    pub username: Option<String>,
    pub user_profile: Option<String>,
    pub post_id: Option<String>,
    pub description: Option<String>,
    pub shared_at: DateTime<Utc>,
}

impl Document for SharePost {
    const COLLECTION: &'static str = "share_posts";

    fn id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Request body for sharing a post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShareDto {
    pub user_id: Option<String>,
    pub post_id: Option<String>,
    pub description: Option<String>,
}
