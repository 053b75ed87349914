//! Progress milestones. Every write snapshots the owner's display name and
//! profile image onto the record; the snapshot is never refreshed by later
//! user edits.

use std::sync::Arc;

use thiserror::Error;

use crate::db::models::{Progress, User};
use crate::db::{new_id, Collection, StoreError};
use crate::services::users::UserDirectory;
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Progress not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("userId is required")]
    MissingUserId,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct ProgressService {
    progress: Collection<Progress>,
    users: Arc<dyn UserDirectory>,
}

impl ProgressService {
    pub fn new(pool: DbPool, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            progress: Collection::new(pool),
            users,
        }
    }

    pub fn list(&self) -> Result<Vec<Progress>, ProgressError> {
        Ok(self.progress.find_all()?)
    }

    pub fn get(&self, progress_id: &str) -> Result<Option<Progress>, ProgressError> {
        Ok(self.progress.find_by_id(progress_id)?)
    }

    pub async fn create(&self, mut progress: Progress) -> Result<Progress, ProgressError> {
        let owner = self.resolve_owner(&progress).await?;

        progress.snapshot_owner(&owner);
        progress.progress_id = Some(new_id());
        self.progress.save(&mut progress)?;

        tracing::info!(
            progress_id = progress.progress_id.as_deref().unwrap_or_default(),
            user_id = %owner.id,
            "Created progress"
        );
        Ok(progress)
    }

    /// Full overwrite of an existing record. The path id wins over any id in
    /// the payload, and the payload's owner must still resolve.
    pub async fn update(
        &self,
        progress_id: &str,
        mut progress: Progress,
    ) -> Result<Progress, ProgressError> {
        if !self.progress.exists_by_id(progress_id)? {
            return Err(ProgressError::NotFound(progress_id.to_string()));
        }

        let owner = self.resolve_owner(&progress).await?;

        progress.progress_id = Some(progress_id.to_string());
        progress.snapshot_owner(&owner);
        self.progress.save(&mut progress)?;

        tracing::info!(progress_id, user_id = %owner.id, "Updated progress");
        Ok(progress)
    }

    pub fn delete(&self, progress_id: &str) -> Result<(), ProgressError> {
        if self.progress.delete_by_id(progress_id)? {
            tracing::info!(progress_id, "Deleted progress");
        }
        Ok(())
    }

    async fn resolve_owner(&self, progress: &Progress) -> Result<User, ProgressError> {
        let user_id = progress
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ProgressError::MissingUserId)?;

        self.users
            .resolve(user_id)
            .await?
            .ok_or_else(|| ProgressError::UserNotFound(user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::users::tests::registration;
    use crate::services::users::{UpdateProfile, UserService};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Directory backed by a fixed map, no store involved.
    struct StaticDirectory(HashMap<String, User>);

    #[async_trait]
    impl UserDirectory for StaticDirectory {
        async fn resolve(&self, user_id: &str) -> Result<Option<User>, StoreError> {
            Ok(self.0.get(user_id).cloned())
        }
    }

    fn static_service(users: &[(&str, &str, &str)]) -> ProgressService {
        let map = users
            .iter()
            .map(|(id, name, image)| {
                let user = User {
                    id: id.to_string(),
                    name: Some(name.to_string()),
                    profile_image: Some(image.to_string()),
                    ..Default::default()
                };
                (id.to_string(), user)
            })
            .collect();
        ProgressService::new(crate::db::test_pool(), Arc::new(StaticDirectory(map)))
    }

    fn milestone(user_id: &str, milestone: &str) -> Progress {
        Progress {
            user_id: Some(user_id.to_string()),
            milestone: Some(milestone.to_string()),
            description: Some("notes".to_string()),
            progress_date: Some("2024-05-01".to_string()),
            skill_category: Some("Programming".to_string()),
            completion_percentage: 30,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_snapshots_owner_and_assigns_id() {
        let service = static_service(&[("u1", "Alice", "a.png")]);
        let mut input = milestone("u1", "M1");
        input.progress_id = Some("client-chosen".into());
        input.username = Some("Mallory".into());

        let created = service.create(input).await.unwrap();
        let id = created.progress_id.clone().unwrap();
        assert_ne!(id, "client-chosen");
        assert_eq!(created.username.as_deref(), Some("Alice"));
        assert_eq!(created.user_profile.as_deref(), Some("a.png"));
        assert_eq!(service.get(&id).unwrap(), Some(created));
    }

    #[tokio::test]
    async fn create_with_unknown_or_missing_user_persists_nothing() {
        let service = static_service(&[("u1", "Alice", "a.png")]);

        let err = service.create(milestone("ghost", "M1")).await.unwrap_err();
        assert!(matches!(err, ProgressError::UserNotFound(id) if id == "ghost"));

        let err = service.create(milestone("  ", "M1")).await.unwrap_err();
        assert!(matches!(err, ProgressError::MissingUserId));

        assert!(service.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_forces_path_id_and_overwrites_everything() {
        let service = static_service(&[("u1", "Alice", "a.png"), ("u2", "Bob", "b.png")]);
        let created = service.create(milestone("u1", "M1")).await.unwrap();
        let id = created.progress_id.clone().unwrap();

        let mut payload = milestone("u2", "M2");
        payload.progress_id = Some("some-other-id".into());
        payload.learning_resources = None;
        payload.completion_percentage = 90;

        let updated = service.update(&id, payload).await.unwrap();
        assert_eq!(updated.progress_id.as_deref(), Some(id.as_str()));
        assert_eq!(updated.username.as_deref(), Some("Bob"));
        assert_eq!(updated.milestone.as_deref(), Some("M2"));
        assert_eq!(updated.completion_percentage, 90);

        let all = service.list().unwrap();
        assert_eq!(all, vec![updated]);
    }

    #[tokio::test]
    async fn update_distinguishes_missing_target_from_missing_user() {
        let service = static_service(&[("u1", "Alice", "a.png")]);
        let created = service.create(milestone("u1", "M1")).await.unwrap();
        let id = created.progress_id.clone().unwrap();

        let err = service
            .update("nope", milestone("u1", "M2"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::NotFound(_)));

        let err = service
            .update(&id, milestone("ghost", "M2"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::UserNotFound(_)));

        // The stored record is untouched by the rejected update
        assert_eq!(service.get(&id).unwrap(), Some(created));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let service = static_service(&[("u1", "Alice", "a.png")]);
        let created = service.create(milestone("u1", "M1")).await.unwrap();
        let id = created.progress_id.unwrap();

        service.delete(&id).unwrap();
        service.delete(&id).unwrap();
        service.delete("never-existed").unwrap();
        assert!(service.get(&id).unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_is_not_refreshed_by_later_renames() {
        let pool = crate::db::test_pool();
        let users = UserService::new(pool.clone(), 4);
        let service = ProgressService::new(pool, Arc::new(users.clone()));

        let alice = users.register(registration("Alice", "a@example.com")).unwrap();
        let p1 = service.create(milestone(&alice.id, "M1")).await.unwrap();
        assert_eq!(p1.username.as_deref(), Some("Alice"));
        assert_eq!(p1.user_profile.as_deref(), Some("alice.png"));

        users
            .update_profile(
                &alice.id,
                UpdateProfile {
                    name: Some("Alice2".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let p2 = service.create(milestone(&alice.id, "M2")).await.unwrap();
        assert_eq!(p2.username.as_deref(), Some("Alice2"));

        let p1_again = service
            .get(p1.progress_id.as_deref().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(p1_again.username.as_deref(), Some("Alice"));
    }
}
