//! Infrastructure adapters. Implement ports.
//!
//! Wikipedia fetch/parse, LLM, SQLite, terminal UI. Map errors to domain errors.

pub mod ai;
pub mod persistence;
pub mod ui;
pub mod wiki;
