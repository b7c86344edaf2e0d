pub mod cache;
pub mod config;
pub mod error;
pub mod helper;
pub mod store;

#[cfg(feature = "reqwest")]
pub mod app;
#[cfg(feature = "reqwest")]
pub mod http;
