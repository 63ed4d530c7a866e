//! # cms-behaviors
//!
//! Content record behaviors for CMS RS.
//!
//! Behaviors are reusable lifecycle protocols that content types opt into.
//! This crate provides `attaching`: ownership of a single versioned file
//! attachment, kept consistent with the owning record's own
//! validate/save/publish/revert workflow.

pub mod attaching;
