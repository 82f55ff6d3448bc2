//! Core library for the donorhub service: donor registry, dashboard
//! statistics, and the matching/forecast/eligibility heuristics behind the
//! charity's registration demo.

pub mod config;
pub mod error;
pub mod support;
pub mod telemetry;
pub mod workflows;
