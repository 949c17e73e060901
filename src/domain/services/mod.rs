pub mod auth_service;
pub mod cache;
pub mod catalog;
pub mod freshness;
pub mod placeholders;
pub mod reservation_service;
pub mod seat_ledger;
