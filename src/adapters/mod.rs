//! Outbound adapters: concrete implementations of the ports.

pub mod classification;
pub mod memory;
pub mod postgres;
