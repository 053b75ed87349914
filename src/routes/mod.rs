pub mod health;
pub mod progress;
pub mod share;
pub mod skill_exchange;
pub mod users;
