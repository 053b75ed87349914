pub mod progress;
pub mod share_posts;
pub mod skill_exchange;
pub mod users;
