//! Domain logic for the briquette annotation dashboard.
//!
//! Everything here is synchronous and session-scoped: parse an
//! uploaded sensor CSV into a typed [`dataset::Dataset`], segment it
//! into fixed-size briquettes, resolve chart clicks back to segments,
//! and accumulate an append-only [`annotation::AnnotationLog`] with
//! lazily assigned briquette identifiers. The only async surface is
//! the [`sink::AnnotationSink`] capability trait, implemented by
//! `briq-db` for the optional PostgreSQL sink.

pub mod annotation;
pub mod dataset;
pub mod error;
pub mod export;
pub mod identifier;
pub mod resolve;
pub mod schema;
pub mod segment;
pub mod session;
pub mod sink;
pub mod timestamp;
