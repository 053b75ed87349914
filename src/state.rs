use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::Config;
use crate::services::progress::ProgressService;
use crate::services::share_posts::SharePostService;
use crate::services::skill_exchange::SkillExchangeService;
use crate::services::users::{UserDirectory, UserService};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub progress: ProgressService,
    pub skill_exchange: SkillExchangeService,
    pub share_posts: SharePostService,
}

impl AppState {
    pub fn new(db: DbPool, config: &Config) -> Self {
        let users = UserService::new(db.clone(), config.auth.bcrypt_cost);
        let directory: Arc<dyn UserDirectory> = Arc::new(users.clone());

        Self {
            progress: ProgressService::new(db.clone(), directory.clone()),
            skill_exchange: SkillExchangeService::new(db.clone()),
            share_posts: SharePostService::new(db, directory),
            users,
        }
    }
}
