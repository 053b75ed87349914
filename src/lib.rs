// Library exports for skillhub
// Integration tests build the router through `app::build_router`

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
