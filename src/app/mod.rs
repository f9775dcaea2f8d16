mod app_helper;
mod cli_manager;
mod command;
mod writable_string;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

pub(crate) mod common;

mod compare_command;
pub(crate) use compare_command::CompareCommand;

mod solve_command;
pub(crate) use solve_command::SolveCommand;
