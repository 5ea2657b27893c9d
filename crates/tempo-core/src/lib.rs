//! Tempo Core - shared primitives for the time virtualization engine
//!
//! This crate provides:
//! - Error types
//! - Speed factor validation
//! - Native-width tick arithmetic
//! - The real time source abstraction behind the virtual clocks

pub mod error;
pub mod source;
pub mod speed;
pub mod tick;

pub use error::*;
pub use source::*;
pub use speed::*;
pub use tick::*;
