//! Integration test suite for the Jack compiler
//!
//! This crate provides integration tests that verify components work
//! together correctly across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use jack_cli;
    pub use parser;
    pub use vm_code;
}
