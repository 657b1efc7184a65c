//! `rigforge-core`: domain foundation building blocks.
//!
//! Holds the error model every operation reports through, plus product ids
//! and whole-rupee money shared by the other crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use money::Money;
pub use value_object::ValueObject;
