use super::{
    app_helper::AppHelper, command::Command, AuthorsCommand, CheckCommand, CompareCommand,
    SolveCommand,
};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches};
use crustiat::{
    iat::IncompleteArgumentationTheory,
    io::{InstanceReader, LpReader},
    stability::ExternalStabilitySolver,
};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Crustiat, a stability estimator for incomplete argumentation theories.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(CompareCommand::new()),
        Box::new(SolveCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the theory")
        .required(true)
}

pub(crate) fn read_input_theory(
    arg_matches: &ArgMatches<'_>,
) -> Result<IncompleteArgumentationTheory<String>> {
    let file = arg_matches
        .value_of(ARG_INPUT)
        .context("missing input file")?;
    read_file_path(file, &mut LpReader::default())
}

pub(crate) fn read_file_path(
    file_path: &str,
    reader: &mut dyn InstanceReader<String>,
) -> Result<IncompleteArgumentationTheory<String>> {
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!(r#"while opening file "{}""#, file_path))?,
    );
    let theory = reader
        .read(&mut file_reader)
        .with_context(|| format!(r#"while reading file "{}""#, file_path))?;
    let system = theory.argumentation_system();
    info!(
        "the theory has {} literal(s), {} contrary pair(s) and {} rule(s)",
        system.language().len(),
        system.n_contraries(),
        system.n_defeasible_rules(),
    );
    info!(
        "{} literal(s) are queryable and {} are in the knowledge base",
        theory.n_queryables(),
        theory.knowledge_base_len(),
    );
    Ok(theory)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

pub(crate) const ARG_EXACT_SOLVER: &str = "EXACT_SOLVER";
const ARG_EXACT_SOLVER_OPTIONS: &str = "EXACT_SOLVER_OPTIONS";
pub(crate) const ARG_EXACT_SOLVER_PREF_OPTIONS: &str = "EXACT_SOLVER_PREF_OPTIONS";

pub(crate) fn exact_solver_args(required: bool) -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_EXACT_SOLVER)
            .long("exact-solver")
            .empty_values(false)
            .multiple(false)
            .help("the program computing the exact stability (e.g. clingo)")
            .required(required),
        Arg::with_name(ARG_EXACT_SOLVER_OPTIONS)
            .long("exact-solver-opt")
            .requires(ARG_EXACT_SOLVER)
            .empty_values(false)
            .multiple(true)
            .number_of_values(1)
            .allow_hyphen_values(true)
            .help("an option to give to the exact solver")
            .required(false),
        Arg::with_name(ARG_EXACT_SOLVER_PREF_OPTIONS)
            .long("exact-solver-pref-opt")
            .requires(ARG_EXACT_SOLVER)
            .empty_values(false)
            .multiple(true)
            .number_of_values(1)
            .allow_hyphen_values(true)
            .help("an option to give to the exact solver when the rule preferences are considered")
            .required(false),
    ]
}

fn values_of(arg_matches: &ArgMatches<'_>, arg: &str) -> Option<Vec<String>> {
    arg_matches
        .values_of(arg)
        .map(|v| v.map(|o| o.to_string()).collect())
}

/// Builds the exact solver described by the CLI arguments, if any.
pub(crate) fn create_exact_solver<'a>(
    arg_matches: &ArgMatches<'_>,
    theory: &'a IncompleteArgumentationTheory<String>,
) -> Option<ExternalStabilitySolver<'a>> {
    let program = arg_matches.value_of(ARG_EXACT_SOLVER)?.to_string();
    let options = values_of(arg_matches, ARG_EXACT_SOLVER_OPTIONS).unwrap_or_default();
    info!("using {} {:?} as the exact solver", program, options);
    let solver = ExternalStabilitySolver::new(theory, program, options);
    match values_of(arg_matches, ARG_EXACT_SOLVER_PREF_OPTIONS) {
        Some(preference_options) => {
            info!("options for rule preferences are {:?}", preference_options);
            Some(solver.with_preference_options(preference_options))
        }
        None => Some(solver),
    }
}
