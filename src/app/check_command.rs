use super::{cli_manager, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};

const CMD_NAME: &str = "check";

pub(crate) struct CheckCommand;

impl CheckCommand {
    pub(crate) fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks input theory files for errors")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        common::read_input_theory(arg_matches).map(|_| ())
    }
}
