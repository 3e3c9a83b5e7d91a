//! prio - Priority-Bucketed Task List Library
//!
//! This library provides the core functionality for the prio CLI tool,
//! a single-user task list grouped into low, medium, and high priority
//! buckets.
//!
//! # Core Concepts
//!
//! - **Tasks**: Records with a stable id, title, due date, tag, and
//!   completion flag
//! - **Priority Buckets**: Every task lives in exactly one of the low,
//!   medium, or high buckets
//! - **Store**: In-memory collection mirrored to a persisted JSON slot on
//!   every mutation
//! - **Theme**: A separately persisted light/dark preference for the board
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output formatting
//! - `storage`: Data directory layout and atomic file writes
//! - `store`: The task collection and its operations
//! - `task`: Task records, priorities, and patches
//! - `theme`: Theme preference resolution
//! - `ui`: The interactive board built on ratatui

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;
pub mod ui;

pub use error::{Error, Result};
