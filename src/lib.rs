pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod session;
pub mod store;
pub mod validate;

pub use error::LeadError;
pub use session::Session;
pub use store::LeadStore;
