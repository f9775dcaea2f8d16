use super::{cli_manager, command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use crustiat::{
    io::ResultWriter,
    stability::{StabilityLabeler, StabilitySolver},
};
use log::info;

const CMD_NAME: &str = "solve";

const ARG_LABELS: &str = "LABELS";
const ARG_WITH_PREFERENCES: &str = "WITH_PREFERENCES";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Computes the stable literals of an incomplete argumentation theory")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .args(&common::exact_solver_args(false))
            .arg(
                Arg::with_name(ARG_WITH_PREFERENCES)
                    .long("with-preferences")
                    .requires(common::ARG_EXACT_SOLVER)
                    .takes_value(false)
                    .help("make the exact solver consider the rule preferences"),
            )
            .arg(
                Arg::with_name(ARG_LABELS)
                    .long("labels")
                    .conflicts_with(common::ARG_EXACT_SOLVER)
                    .takes_value(false)
                    .help("also print the remaining statuses of each literal and rule"),
            )
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let theory = common::read_input_theory(arg_matches)?;
        let writer = ResultWriter::default();
        let mut out = std::io::stdout();
        if let Some(solver) = common::create_exact_solver(arg_matches, &theory) {
            let with_preferences = arg_matches.is_present(ARG_WITH_PREFERENCES);
            info!("computing the exact stability (preferences: {})", with_preferences);
            let result = solver
                .with_preferences(with_preferences)
                .compute_stability()
                .context("while computing the exact stability")?;
            return writer.write_result(&result, &mut out);
        }
        let mut labeler = StabilityLabeler::new(&theory);
        if arg_matches.is_present(ARG_LABELS) {
            let labels = labeler.compute_labels()?;
            writer.write_labels(&theory, &labels, &mut out)?;
            let result = labels.to_stability_result(theory.language());
            info!("{} stable literals found", result.n_stable());
            writer.write_result(&result, &mut out)
        } else {
            let result = labeler.compute_stability()?;
            writer.write_result(&result, &mut out)
        }
    }
}
