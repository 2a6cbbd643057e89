//! Core library for the `capture-load` CLI.
//!
//! The binary drives a stepped load campaign against a screenshot-capture
//! endpoint: at each concurrency level it fires that many identical POST
//! requests at once, checks every response against the capture contract, and
//! prints per-step latency and error statistics. The pieces are exposed here
//! so they can be driven and tested on their own.
pub mod app;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
