//! Command implementations.
//!
//! One module per CLI subcommand. Commands load settings, call into the
//! orchestration core, and render results; they own no generation logic.

/// Batch generation over a roster file.
pub mod batch;
/// Configuration inspection commands.
pub mod config;
/// Single-student comment generation.
pub mod generate;
/// History inspection and pruning.
pub mod history;
/// Configuration initialization.
pub mod init;
/// Comment rewrite flow.
pub mod rewrite;
/// API key validation.
pub mod validate;
