//! Command handlers, one per lifecycle operation.

pub mod comment;
pub mod issue;
