//! Library exports for identity-gate, shared between the binary and tests.

pub mod auth;
pub mod config;
pub mod identity;
pub mod models;
pub mod routes;
pub mod startup;
pub mod state;
pub mod utils;
