//! # cms-core
//!
//! Core types, traits, and utilities for CMS RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Validation error collections
//! - Service result types (ServiceResult)
//! - Core traits (Identifiable, Timestamped)

pub mod error;
pub mod result;
pub mod traits;

pub use error::*;
pub use result::*;
pub use traits::*;
