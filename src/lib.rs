//! Sales Planner - Yearly Sales Target Distribution & Confirmation Engine
//!
//! This crate implements baseline seeding from prior-year actuals, monthly
//! target distribution, unit-price resolution, and the per-customer
//! confirmation lifecycle for yearly sales planning.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
