//! Ratatui widgets for the introboard TUI.

pub mod card_list;
pub mod command_bar;
pub mod help;
pub mod page;
pub mod query_bar;
pub mod tab_bar;
