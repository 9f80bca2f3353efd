//! # API Layer
//!
//! User-facing surface: offer table rendering and the command line runner.

#[cfg(feature = "cli")]
pub mod cli;
pub mod table;
