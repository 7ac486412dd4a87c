use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StudentError};
use crate::model::StudentInput;
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(store: &mut S, input: &StudentInput) -> Result<CmdResult> {
    let new = input.validate()?;
    let ids = store.insert(std::slice::from_ref(&new))?;
    let id = *ids
        .first()
        .ok_or_else(|| StudentError::Api("Insert returned no id".to_string()))?;
    info!(%id, "added student");

    let stored = store.get_active(id)?;
    let mut result = CmdResult {
        created_ids: ids,
        ..Default::default()
    }
    .with_affected_students(stored.into_iter().collect());
    result.add_message(CmdMessage::success(format!(
        "New student added successfully (ID {}).",
        id
    )));
    Ok(result)
}
