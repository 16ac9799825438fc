//! Attendance-driven payroll engine
//!
//! This crate classifies punch-in/punch-out attendance records, detects
//! excess leave from absence streaks, and converts both into salary
//! deductions prorated over a month's working days. An axum API serves
//! payroll reports and per-employee breakdowns over an in-memory store.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
