//! Polewatch - Operational health API for solar street-light poles
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod health;
pub mod routes;
