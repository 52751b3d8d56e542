//! CRUD HTTP service over a single `t_client` table.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod service;
