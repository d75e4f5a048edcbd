pub mod accounting;
pub mod app;
pub mod auth;
pub mod db;
pub mod env;
