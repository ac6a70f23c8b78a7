//! Utility modules.

#[cfg(any(test, feature = "test-utils"))]
pub mod test_problems;
