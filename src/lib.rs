pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod shell;
pub mod storage;
