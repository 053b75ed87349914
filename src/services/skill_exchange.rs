use thiserror::Error;

use crate::db::models::SkillExchange;
use crate::db::{new_id, Collection, StoreError};
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum SkillExchangeError {
    #[error("Skill exchange not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Skill exchange listings. Stored as supplied by the caller; user fields are
/// not checked against the user directory.
#[derive(Clone)]
pub struct SkillExchangeService {
    listings: Collection<SkillExchange>,
}

impl SkillExchangeService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            listings: Collection::new(pool),
        }
    }

    pub fn create(&self, mut listing: SkillExchange) -> Result<SkillExchange, SkillExchangeError> {
        listing.id = Some(new_id());
        self.listings.save(&mut listing)?;

        tracing::info!(
            listing_id = listing.id.as_deref().unwrap_or_default(),
            "Created skill exchange"
        );
        Ok(listing)
    }

    pub fn list(&self) -> Result<Vec<SkillExchange>, SkillExchangeError> {
        Ok(self.listings.find_all()?)
    }

    pub fn get(&self, id: &str) -> Result<SkillExchange, SkillExchangeError> {
        self.listings
            .find_by_id(id)?
            .ok_or_else(|| SkillExchangeError::NotFound(id.to_string()))
    }

    /// Copies only the offered/requested skills, description and exchange
    /// date from `changes`. Owner, mode, location and contact stay as stored.
    pub fn update(
        &self,
        id: &str,
        changes: SkillExchange,
    ) -> Result<SkillExchange, SkillExchangeError> {
        let mut existing = self.get(id)?;

        existing.skill_offered = changes.skill_offered;
        existing.skill_requested = changes.skill_requested;
        existing.description = changes.description;
        existing.exchange_date = changes.exchange_date;
        self.listings.save(&mut existing)?;

        tracing::info!(listing_id = id, "Updated skill exchange");
        Ok(existing)
    }

    pub fn delete(&self, id: &str) -> Result<(), SkillExchangeError> {
        if self.listings.delete_by_id(id)? {
            tracing::info!(listing_id = id, "Deleted skill exchange");
        }
        Ok(())
    }
}
