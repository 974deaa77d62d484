//! Command runner adapters.

pub mod process;

pub use process::ProcessRunner;
