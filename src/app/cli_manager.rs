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

use super::{app_helper, command::Command, writable_string::WritableString};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg};
use log::info;
use std::{ffi::OsString, str::FromStr};
use sysinfo::System;

/// A structure used to handle the set of commands and to process the CLI arguments against them.
pub(crate) struct CliManager<'a> {
    app_name: &'a str,
    version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

const APP_HELPER_LOGGING_LEVEL_ARG: &str = "APP_HELPER_LOGGING_LEVEL_ARG";

/// The CLI argument setting the logging level, to add to each command.
pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(APP_HELPER_LOGGING_LEVEL_ARG)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

impl<'a> CliManager<'a> {
    pub fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        CliManager {
            app_name,
            version,
            author,
            about,
            commands: vec![],
        }
    }

    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    pub fn parse_cli<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.into()).collect();
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::NeedsSubcommandHelp)
            .setting(AppSettings::SubcommandRequired)
            .version(self.version)
            .author(self.author)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        match app.clone().get_matches_from_safe(args.iter()) {
            Ok(matches) => {
                for c in self.commands.iter() {
                    if let Some(matches) = matches.subcommand_matches(c.name()) {
                        let log_level = match matches.value_of(APP_HELPER_LOGGING_LEVEL_ARG) {
                            Some(l) => log::LevelFilter::from_str(l)
                                .map_err(|_| anyhow!("invalid logging level {:?}", l))?,
                            None => log::LevelFilter::Info,
                        };
                        app_helper::init_logger_with_level(log_level);
                        info!("{} {}", self.app_name, self.version);
                        sys_info();
                        return c.execute(matches);
                    }
                }
                Err(anyhow!("no command matches the provided arguments"))
            }
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            }) => {
                app_helper::init_logger();
                self.print_help(&mut app, &args)
            }
            Err(e) => {
                app_helper::init_logger();
                info!("{} {}", self.app_name, self.version);
                Err(anyhow!("{}", e))
            }
        }
    }

    fn print_help(&self, app: &mut App, args: &[OsString]) -> Result<()> {
        const HELP_STRINGS: [&str; 3] = ["help", "-h", "--help"];
        let print_message = |message: WritableString| {
            message.to_string().split('\n').for_each(|s| info!("{}", s));
            info!("");
        };
        let str_args = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect::<Vec<String>>();
        let subcommand_name = match str_args.get(1).map(|s| s.as_str()) {
            Some(a) if HELP_STRINGS.contains(&a) => str_args.get(2),
            Some(_) => str_args.get(1),
            None => None,
        };
        if let Some(c) = subcommand_name.and_then(|n| self.commands.iter().find(|c| c.name() == n.as_str())) {
            let mut message = WritableString::default();
            c.clap_subcommand()
                .write_long_help(&mut message)
                .context("while writing the help message")?;
            print_message(message);
            return Ok(());
        }
        let mut message = WritableString::default();
        app.write_long_help(&mut message)
            .context("while writing the help message")?;
        print_message(message);
        Ok(())
    }
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = System::new_all();
    let unknown = || "[unknown]".to_string();
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_kinds: Vec<&str> = sys.cpus().iter().map(|p| p.brand()).collect();
    cpu_kinds.sort_unstable();
    cpu_kinds.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count()
            .map(|n| n.to_string())
            .unwrap_or_else(unknown),
        cpu_kinds
    );
    info!("total memory: {} KB", sys.total_memory() >> 10);
    info!("----------------------------------------");
}
