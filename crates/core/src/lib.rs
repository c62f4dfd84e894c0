//! FarmaLink Core - Shared types library.
//!
//! This crate provides the domain types used across the FarmaLink components:
//! - `panel` - Server-rendered management panel (products, purchases, payments,
//!   employees, alerts)
//! - `cli` - Command-line tools for the local alert log and access table
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Identities, roles, section keys, alert entries, IDs and money

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
