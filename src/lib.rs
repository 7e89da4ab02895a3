//! Tank Dashboard - live view of a pump/tank sensor monitor with anomaly detection
//!
//! This library exposes the core modules for testing and reuse.

pub mod actions;
pub mod common;
pub mod config;
pub mod error;
pub mod monitor;
pub mod polling;
pub mod routes;
pub mod views;
