mod authenticator;
mod client;
mod models;

pub use authenticator::Authenticator;
pub use client::HttpStore;
