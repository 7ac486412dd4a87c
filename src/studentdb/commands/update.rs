use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Field, FieldUpdate, StudentId};
use crate::store::DataStore;
use tracing::info;

/// Sets one column of an active student, validated like an insert.
pub fn run<S: DataStore>(
    store: &mut S,
    id: StudentId,
    field: Field,
    raw: &str,
) -> Result<CmdResult> {
    let update = FieldUpdate::parse(field, raw)?;

    if !store.update_field(id, &update)? {
        return Ok(CmdResult::not_found(
            id,
            "No updates were made. Please check the student ID and try again.",
        ));
    }
    info!(%id, %field, "updated student");

    let updated = store.get_active(id)?;
    let mut result = CmdResult::default().with_affected_students(updated.into_iter().collect());
    result.add_message(CmdMessage::success(format!(
        "Student {} updated successfully to {}.",
        field, update.value
    )));
    Ok(result)
}
