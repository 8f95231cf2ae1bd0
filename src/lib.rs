//! `cheongyak` library crate.
//!
//! Collects 청약 (housing subscription) listings from the public
//! ApplyhomeInfoDetailSvc API and normalizes them into one record shape.
//!
//! The binary (`cheongyak`) is a thin wrapper around this library so that
//! the fetch and normalization logic is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod registry;
pub mod report;
pub mod telemetry;
