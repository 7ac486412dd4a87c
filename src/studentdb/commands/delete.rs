use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StudentId;
use crate::store::DataStore;
use tracing::info;

/// Tombstones a student. Deleting twice reports not found the second time.
pub fn run<S: DataStore>(store: &mut S, id: StudentId) -> Result<CmdResult> {
    let Some(student) = store.get_active(id)? else {
        return Ok(CmdResult::not_found(
            id,
            format!("No student found with ID {}.", id),
        ));
    };

    if !store.soft_delete(id)? {
        return Ok(CmdResult::not_found(
            id,
            format!("No student found with ID {}.", id),
        ));
    }
    info!(%id, "soft-deleted student");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student deleted successfully ({}): {}",
        id,
        student.full_name()
    )));
    Ok(result.with_affected_students(vec![student]))
}
