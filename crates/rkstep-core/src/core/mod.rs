//! Core types for fixed-step integration.

pub mod derivative;
pub mod error;
pub mod grid;
pub mod trajectory;
pub mod types;

pub use derivative::*;
pub use error::*;
pub use grid::*;
pub use trajectory::*;
pub use types::*;
