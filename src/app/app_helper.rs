// crusti_app_helper
// Copyright (C) 2020  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::{cli_manager::CliManager, command::Command};
use anyhow::Result;
use log::{error, info};
use std::{ffi::OsString, sync::Once, time::Instant};

static LOGGER_INIT: Once = Once::new();

/// The main struct used to build the app.
///
/// Create an instance, add the commands, then call [`launch_app`](AppHelper::launch_app).
/// If an error is returned by a command, the error chain is logged and a status of 1 is returned to the system.
pub(crate) struct AppHelper<'a> {
    cli_manager: CliManager<'a>,
}

impl<'a> AppHelper<'a> {
    /// Creates a new instance of the helper.
    pub fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        AppHelper {
            cli_manager: CliManager::new(app_name, version, author, about),
        }
    }

    /// Adds a new command to the app.
    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.cli_manager.add_command(command);
    }

    /// Launches the application, reading the arguments through `std::env::args_os()`.
    pub fn launch_app(self) {
        self.launch_app_with_args(std::env::args_os())
    }

    /// Launches the application with the provided arguments.
    ///
    /// Exits the process with status 1 if the command fails.
    pub fn launch_app_with_args<I, T>(self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Err(e) = self.execute_app(args) {
            error!("an error occurred: {}", e);
            e.chain()
                .skip(1)
                .for_each(|err| error!("caused by: {}", err));
            std::process::exit(1);
        }
    }

    fn execute_app<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let start_time = Instant::now();
        let result = self.cli_manager.parse_cli(args);
        if result.is_ok() {
            info!("exiting successfully after {:?}", start_time.elapsed());
        }
        result
    }
}

pub(crate) fn init_logger() {
    init_logger_with_level(log::LevelFilter::Info)
}

pub(crate) fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "![{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stdout())
            .apply()
            .unwrap_or(());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{App, Arg, SubCommand};

    struct LocalCommand;

    impl<'a> Command<'a> for LocalCommand {
        fn name(&self) -> &str {
            "local_command_name"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("local_command_name")
                .about("local_command_about")
                .arg(Arg::with_name("kill").short("k"))
        }

        fn execute(&self, arg_matches: &clap::ArgMatches<'_>) -> Result<()> {
            if arg_matches.is_present("kill") {
                Err(anyhow::anyhow!("foo"))
            } else {
                Ok(())
            }
        }
    }

    fn app_helper() -> AppHelper<'static> {
        init_logger();
        let mut h = AppHelper::new("app_name", "app_version", "author", "about");
        h.add_command(Box::new(LocalCommand));
        h
    }

    #[test]
    fn test_no_args() {
        app_helper()
            .execute_app(vec![] as Vec<&'static str>)
            .unwrap_err();
    }

    #[test]
    fn test_no_subcommand() {
        app_helper().execute_app(vec!["app"]).unwrap_err();
    }

    #[test]
    fn test_subcommand_ok() {
        app_helper()
            .execute_app(vec!["app", "local_command_name"])
            .unwrap();
    }

    #[test]
    fn test_subcommand_err() {
        app_helper()
            .execute_app(vec!["app", "local_command_name", "-k"])
            .unwrap_err();
    }
}
