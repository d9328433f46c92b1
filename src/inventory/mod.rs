pub mod dto;
pub mod expiry;
pub mod handlers;
pub mod services;
