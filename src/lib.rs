pub mod api;
pub mod bills;
pub mod config;
pub mod format;
mod macros;
pub mod model;
pub mod new_bill;
pub mod routes;
pub mod session;
pub mod store;
pub mod ui;
