//! # Application Layer
//!
//! Use-case orchestration on top of the domain model.

pub mod services;
