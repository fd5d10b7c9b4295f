//! Database schema and models

pub mod init;
pub mod migrations;
pub mod models;

pub use init::*;
pub use models::*;
