//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every studentdb operation, whatever the UI.
//!
//! - **Dispatches** to the matching command function
//! - **Owns the store**: built once by the driver and handed in here, never global
//! - **Returns structured types** (`Result<CmdResult>`), never strings to print
//!
//! ## Generic Over DataStore
//!
//! `StudentApi<S: DataStore>` is generic over the storage backend:
//! - Production: `StudentApi<SqliteStore>`
//! - Testing: `StudentApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{Field, SearchField, StudentId, StudentInput};
use crate::store::DataStore;
use std::path::Path;

/// The main API facade for studentdb operations.
pub struct StudentApi<S: DataStore> {
    store: S,
    paths: commands::StudentDbPaths,
}

impl<S: DataStore> StudentApi<S> {
    pub fn new(store: S, paths: commands::StudentDbPaths) -> Self {
        Self { store, paths }
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store)
    }

    pub fn add_student(&mut self, input: &StudentInput) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, input)
    }

    pub fn import_students(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn list_students(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn get_student(&self, id: StudentId) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn update_student(
        &mut self,
        id: StudentId,
        field: Field,
        value: &str,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, field, value)
    }

    pub fn delete_student(&mut self, id: StudentId) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn search_students(&self, field: SearchField, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, field, query)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::StudentDbPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, StudentDbPaths};
