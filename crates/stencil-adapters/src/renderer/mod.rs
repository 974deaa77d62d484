//! Substitution adapters.

pub mod jinja;

pub use jinja::JinjaRenderer;
