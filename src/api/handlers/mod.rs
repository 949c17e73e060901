pub mod auth;
pub mod cache;
pub mod event;
pub mod health;
pub mod profile;
pub mod reservation;
pub mod session;
pub mod settings;
pub mod template;
