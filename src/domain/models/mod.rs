pub mod auth;
pub mod event;
pub mod profile;
pub mod reservation;
pub mod session;
pub mod settings;
pub mod template;
