//! Command handlers. Each module translates parsed CLI arguments into core
//! calls and user-facing output; no scaffolding logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod make;
