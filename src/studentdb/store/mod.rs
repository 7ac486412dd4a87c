//! # Storage Layer
//!
//! This module defines the storage abstraction for studentdb. The [`DataStore`]
//! trait allows the command layer to work against different backends.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: Production storage, a single `Students` table in
//!   a SQLite file. The DDL matches existing `StudentDB.sqlite` files column for
//!   column, so those can be opened as-is.
//! - [`memory::InMemoryStore`]: Vector-backed storage for testing command logic.
//!
//! ## Contract
//!
//! Every implementation must honor the same rules:
//!
//! - **Ids**: assigned by the store, increasing, never reused.
//! - **Tombstones**: `soft_delete` flips `is_deleted`; the row stays. Every
//!   read, update and search ignores tombstoned rows, so there is no way back.
//! - **Not found is not an error**: `get_active` returns `None`, `update_field`
//!   and `soft_delete` return `false` when no active row matched.
//! - **Atomic writes**: `insert` either stores the whole batch or nothing.
//! - **Ordering**: listings and search results come back in id order.
//! - **Text search**: substring match after [`crate::model::fold_case`] on both
//!   sides, so case is ignored for every Unicode letter.
//!
//! Input reaching the store is already validated; the store does not re-check
//! field rules.

use crate::error::Result;
use crate::model::{FieldUpdate, NewStudent, SearchQuery, Student, StudentId};

pub mod memory;
pub mod sqlite;

/// Abstract interface for student storage.
pub trait DataStore {
    /// Create the backing table if missing. Safe to call repeatedly.
    fn init_schema(&mut self) -> Result<()>;

    /// Insert a batch of records as active rows, returning their ids in order.
    fn insert(&mut self, students: &[NewStudent]) -> Result<Vec<StudentId>>;

    /// All active rows.
    fn list_active(&self) -> Result<Vec<Student>>;

    /// A single active row.
    fn get_active(&self, id: StudentId) -> Result<Option<Student>>;

    /// Change one column of an active row. `false` when nothing matched.
    fn update_field(&mut self, id: StudentId, update: &FieldUpdate) -> Result<bool>;

    /// Tombstone an active row. `false` when nothing matched.
    fn soft_delete(&mut self, id: StudentId) -> Result<bool>;

    /// Active rows matching the query.
    fn search(&self, query: &SearchQuery) -> Result<Vec<Student>>;
}
