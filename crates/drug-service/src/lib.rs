//! # drug-service
//!
//! HTTP/JSON service for drug interaction, type catalog, and
//! contraindication lookups.
//!
//! The server starts answering requests immediately while the three
//! datasets load in the background; see [`DrugServer`] for how partially
//! loaded data is served and how readiness is reported.

#![warn(missing_docs)]

mod config;
mod error;
mod routes;
mod server;

pub use config::ServiceConfig;
pub use error::{ApiError, ErrorBody};
pub use routes::router;
pub use server::DrugServer;

// Re-export the query contract for convenience
pub use drug_loader::{BrowseQuery, DrugQueries, QueryError};
