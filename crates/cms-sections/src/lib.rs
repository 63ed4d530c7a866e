//! # cms-sections
//!
//! Section hierarchy for CMS RS.
//!
//! Sections are the organizational tree that content and attachments are
//! filed under. This crate provides the `Section` entity and a lookup
//! store with an in-memory implementation.

pub mod section;
pub mod store;

pub use section::Section;
pub use store::{MemorySectionStore, SectionStore};
