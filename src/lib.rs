//! Core library for the `restpoll` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, the HTTP transport, the poll loop with its
//! statistics, and body rendering. The primary user-facing interface is the
//! `restpoll` command-line application; library APIs may evolve as the CLI
//! grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod output;
pub mod poll;
pub mod shutdown;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
