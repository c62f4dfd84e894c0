//! Core types for FarmaLink.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod alert;
pub mod id;
pub mod identity;
pub mod money;
pub mod role;
pub mod section;

pub use alert::{AlertEntry, AlertKind, AlertKindError};
pub use id::*;
pub use identity::Identity;
pub use money::{Currency, Money};
pub use role::{Role, RoleError};
pub use section::{SectionKey, SectionKeyError};
