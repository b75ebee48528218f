pub mod backend;
pub mod config;
pub mod coordinator;
pub mod csrf;
pub mod errors;
pub mod flash;
pub mod gateway;
pub mod handlers;
pub mod identity;
pub mod local_store;
pub mod models;
pub mod preferences;
pub mod repository;
pub mod storage;
pub mod templates_structs;
pub mod validate;
