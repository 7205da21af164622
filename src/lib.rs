//! Solstore - storefront backend and client
//!
//! Product catalog, order intake, token-gated admin management with image
//! uploads, and the client-side controller that drives the shop UI.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod model;
pub mod storage;
pub mod uploads;
pub mod utils;
