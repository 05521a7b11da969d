//! Domain layer: aggregates, value objects, and domain errors.

pub mod classification;
pub mod comment;
pub mod foundation;
pub mod issue;
