//! Civic Report - Municipal Issue Reporting Core
//!
//! This crate implements the issue lifecycle and classification workflow for
//! a municipal issue-reporting platform: citizens submit urban problem
//! reports, authorities triage and resolve them, and admins moderate content.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
