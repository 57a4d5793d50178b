pub mod dates;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;
