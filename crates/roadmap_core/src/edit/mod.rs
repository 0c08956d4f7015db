//! Edits against the canonical record.
//!
//! # Responsibility
//! - Resolve view-level edit addresses against the current record.
//! - Hand back a new record; the caller swaps its reference.

pub mod resolver;

pub use resolver::{
    apply, apply_edit, apply_edit_with_outcome, EditOutcome, EditTarget, StaleAddress,
};
