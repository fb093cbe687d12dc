//! `cortexd` — cyber-immune host telemetry simulator
//!
//! This library provides the simulation engine behind the cortex dashboard:
//! synthetic CPU/entropy/process/network telemetry driven by a small state
//! machine, an HTTP API for the rendering layer, and an optional LLM
//! analysis uplink.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod observability;
pub mod server;
