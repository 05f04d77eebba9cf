//! # hcloud-core
//!
//! Core types and utilities for working with the Hetzner Cloud API.
//!
//! This crate provides the shared error type, client configuration, the HTTP
//! transport and the strongly-typed identifiers used by the endpoint crates.
//!
//! ## Modules
//!
//! - [`error`] - Error type and provider error body mapping
//! - [`id`] - Strongly-typed integer ids and id-or-object arguments
//! - [`config`] - Configuration structures for API clients
//! - [`client`] - HTTP transport and client tuning
//! - [`query`] - Query parameter builders and key normalization

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod query;

// Re-export commonly used types
pub use error::{Error, Result};
