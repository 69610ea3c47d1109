#![doc = "The `taskloom` library crate."]
#![doc = ""]
#![doc = "Core business logic for the taskloom API: credential storage and"]
#![doc = "verification, token issuance, per-request identity resolution,"]
#![doc = "ownership enforcement, and owner-scoped task queries, plus the"]
#![doc = "HTTP route handlers wired up by the `taskloom` binary."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
