//! Backend mirror for rolskanet.fr league data.
//!
//! Scrapes the public match-calendar and team-ranking pages, classifies
//! their table rows into typed records, and serves the latest snapshot of
//! each over a small HTTP API.

pub mod config;
pub mod logging;
pub mod module;
pub mod server;
