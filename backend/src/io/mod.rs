//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services: request
//! parsing, JSON serialization and translation of domain errors into status
//! codes. Everything is exposed through the REST API in [`rest`].

pub mod rest;

pub use rest::*;
