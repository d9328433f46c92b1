pub mod dto;
pub mod handlers;
pub mod selection;
pub mod services;
