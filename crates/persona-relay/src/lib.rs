pub mod config;
pub mod handlers;
pub mod models;
pub mod persona;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
