//! tplload: phishing-simulation template catalog loader
//!
//! A one-shot CLI that imports pipe-delimited template records into the
//! SQLite-backed template catalog, creating category lookup rows on first
//! reference.

pub mod cli;
pub mod core;
pub mod ingest;
