//! Wire and domain types shared between the storefront client crates.

pub mod domain;
pub mod error;
pub mod protocol;

#[cfg(test)]
#[path = "tests/wire_tests.rs"]
mod tests;
