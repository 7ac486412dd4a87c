use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    store.init_schema()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Students table is ready."));
    Ok(result)
}
