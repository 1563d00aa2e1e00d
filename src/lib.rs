pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod peers;
pub mod repository;
pub mod services;
pub mod store;
pub mod validate;
