//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Type tests (Keycode names, aliases, canonical keys)
//! - Parser tests (key sequence text syntax)
//! - Static tree tests
//! - Dynamic registry tests
//! - Engine tests (precedence, fail-fast, reentrancy)
//! - Shadowed binding tests

#[cfg(test)]
mod engine_tests;
