pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod store;
