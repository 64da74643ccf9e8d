//! Common test utilities for livid integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated environment with input, workspace and HOME
//! - Fixtures: Reusable inputs and program sources

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
