use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let students = store.list_active()?;
    let mut result = CmdResult::default();
    if students.is_empty() {
        result.add_message(CmdMessage::info("No students found."));
    }
    Ok(result.with_listed_students(students))
}
