//! Core use-case services.
//!
//! # Responsibility
//! - Hold session state and orchestrate parse, edit and projection calls.
//! - Keep UI/FFI layers decoupled from model and resolver details.

pub mod roadmap_session;
