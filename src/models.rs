pub mod auth;
pub mod forms;
pub mod money;
pub mod records;
pub mod views;
