//! # StudentDB Architecture
//!
//! StudentDB is a **UI-agnostic student records library** with a thin CLI on top.
//! The interactive menu and the subcommands are only drivers: every rule about
//! what may be written, and how records are found, lives below the API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the menu loop, renders tables     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the store; one instance per process                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and phone normalization of raw input          │
//! │  - Returns structured `CmdResult`s, never prints            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - SqliteStore (production), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Deletes
//!
//! Records are never physically removed. Deleting a student sets its
//! `isDeleted` flag, and every read, update and search path filters on that
//! flag. A tombstoned row can not be brought back through this library.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** prompts; re-asking for bad input is the driver's job
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Student`, `Field`, `SearchQuery`)
//! - [`validation`]: Field predicates and `ValidationError`
//! - [`phone`]: Phone number normalization
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, the interactive menu and table rendering for the binary

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod phone;
pub mod store;
pub mod validation;
