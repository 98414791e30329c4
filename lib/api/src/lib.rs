//! HTTP API for NutriSim
//!
//! - `POST /recommend` - nutritionally similar foods, excluding allergens
//! - `GET /health` - liveness and dataset size

pub mod rest;

pub use rest::{configure, RestApi};
