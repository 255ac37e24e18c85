//! Unit tests for the botstrap CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod config_service;
mod preflight_service;
