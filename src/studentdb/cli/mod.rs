//! Terminal front end: rendering and the interactive menu.
//!
//! Nothing here touches storage directly; every operation goes through
//! `StudentApi` and is printed from the returned `CmdResult`.

pub mod menu;
pub mod render;
