pub mod auth;
pub mod record_service;
