use super::{cli_manager, command::Command, common};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use crustiat::{
    iat::IncompleteArgumentationTheory,
    stability::{StabilityLabeler, StabilityResult, StabilitySolver, Status},
};
use log::info;
use std::time::Instant;
use strum::IntoEnumIterator;

const CMD_NAME: &str = "compare";

pub(crate) struct CompareCommand;

impl CompareCommand {
    pub(crate) fn new() -> Self {
        CompareCommand
    }
}

impl<'a> Command<'a> for CompareCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks the stable literals found by the approximation against an exact solver")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .args(&common::exact_solver_args(true))
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let theory = common::read_input_theory(arg_matches)?;
        let start = Instant::now();
        let approximation = StabilityLabeler::new(&theory).compute_stability()?;
        info!("approximation computed in {:?}", start.elapsed());
        let approximation = to_lowercase(&approximation);
        let exact = run_exact_solver(arg_matches, &theory, false)?;
        println!("approximation: {} stable literal(s)", approximation.n_stable());
        println!("exact: {} stable literal(s)", exact.n_stable());
        let sound = approximation.is_subset_of(&exact);
        println!("sound: {}", sound);
        let equal = if arg_matches.is_present(common::ARG_EXACT_SOLVER_PREF_OPTIONS) {
            let exact_with_preferences = run_exact_solver(arg_matches, &theory, true)?;
            println!(
                "exact with preferences: {} stable literal(s)",
                exact_with_preferences.n_stable()
            );
            let equal = exact == exact_with_preferences;
            println!("equal: {}", equal);
            equal
        } else {
            true
        };
        if !sound {
            return Err(anyhow!(
                "the approximation found stable literals the exact solver does not confirm"
            ));
        }
        if !equal {
            return Err(anyhow!(
                "the exact results differ depending on the rule preferences"
            ));
        }
        Ok(())
    }
}

fn run_exact_solver(
    arg_matches: &ArgMatches<'_>,
    theory: &IncompleteArgumentationTheory<String>,
    with_preferences: bool,
) -> Result<StabilityResult<String>> {
    let solver = common::create_exact_solver(arg_matches, theory)
        .context("no exact solver provided")?;
    let start = Instant::now();
    let result = solver
        .with_preferences(with_preferences)
        .compute_stability()
        .context("while computing the exact stability")?;
    info!(
        "exact stability (preferences: {}) computed in {:?}",
        with_preferences,
        start.elapsed()
    );
    Ok(result)
}

// names are lower-cased when the theory is sent to the exact solver
fn to_lowercase(result: &StabilityResult<String>) -> StabilityResult<String> {
    let mut lowercase = StabilityResult::default();
    for status in Status::iter() {
        for literal in result.literals_with_status(status) {
            lowercase.insert(literal.to_lowercase(), status);
        }
    }
    lowercase
}
