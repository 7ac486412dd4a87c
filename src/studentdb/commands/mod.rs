//! # Commands
//!
//! One module per operation. Each `run` takes the store explicitly, does the
//! validation and normalization for its operation and returns a [`CmdResult`].
//!
//! Validation failures come back as `Err(StudentError::Validation)` so a
//! driver can re-prompt. A missing or tombstoned id is *not* an error: the
//! result carries the id in [`CmdResult::missing_ids`] plus a warning message.

use crate::config::StudentDbConfig;
use crate::model::{Student, StudentId};
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod get;
pub mod import;
pub mod init;
pub mod list;
pub mod search;
pub mod update;

#[derive(Debug, Clone)]
pub struct StudentDbPaths {
    pub home: PathBuf,
    pub database: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Rows written by the operation, read back after the write.
    pub affected_students: Vec<Student>,
    /// Rows returned by a read.
    pub listed_students: Vec<Student>,
    /// Ids assigned by an insert, in input order.
    pub created_ids: Vec<StudentId>,
    /// Ids that matched no active row.
    pub missing_ids: Vec<StudentId>,
    pub config: Option<StudentDbConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_students(mut self, students: Vec<Student>) -> Self {
        self.affected_students = students;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<Student>) -> Self {
        self.listed_students = students;
        self
    }

    pub fn with_config(mut self, config: StudentDbConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub(crate) fn not_found(id: StudentId, message: impl Into<String>) -> Self {
        let mut result = CmdResult {
            missing_ids: vec![id],
            ..Default::default()
        };
        result.add_message(CmdMessage::warning(message));
        result
    }

    pub fn is_not_found(&self) -> bool {
        !self.missing_ids.is_empty()
    }
}
