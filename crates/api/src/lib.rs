//! HTTP service for the briquette annotation dashboard.
//!
//! Exposes session upload, plot series, click-to-annotate, and CSV
//! export endpoints over the `briq-core` domain logic, with an
//! optional PostgreSQL annotation sink from `briq-db`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod sessions;
pub mod state;
