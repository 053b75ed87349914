use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::db::models::{ShareDto, SharePost};
use crate::db::{new_id, Collection, StoreError};
use crate::services::users::UserDirectory;
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum SharePostError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("userId is required")]
    MissingUserId,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct SharePostService {
    shares: Collection<SharePost>,
    users: Arc<dyn UserDirectory>,
}

impl SharePostService {
    pub fn new(pool: DbPool, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            shares: Collection::new(pool),
            users,
        }
    }

    pub async fn create(&self, share: ShareDto) -> Result<SharePost, SharePostError> {
        let user_id = share
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(SharePostError::MissingUserId)?;

        let user = self
            .users
            .resolve(user_id)
            .await?
            .ok_or_else(|| SharePostError::UserNotFound(user_id.to_string()))?;

        let mut post = SharePost {
            id: new_id(),
            user_id: user.id,
            username: user.name,
            user_profile: user.profile_image,
            post_id: share.post_id,
            description: share.description,
            shared_at: Utc::now(),
        };
        self.shares.save(&mut post)?;

        tracing::info!(share_id = %post.id, user_id = %post.user_id, "Shared post");
        Ok(post)
    }

    pub fn list_all(&self) -> Result<Vec<SharePost>, SharePostError> {
        Ok(self.shares.find_all()?)
    }

    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<SharePost>, SharePostError> {
        Ok(self.shares.find_by_field("userId", user_id)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), SharePostError> {
        if self.shares.delete_by_id(id)? {
            tracing::info!(share_id = id, "Deleted shared post");
        }
        Ok(())
    }
}
