use super::{StabilityResult, StabilitySolver};
use crate::iat::IncompleteArgumentationTheory;
use crate::io::LpWriter;
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

lazy_static! {
    static ref STATUS_ATOM_PATTERN: Regex = Regex::new(r"^([_[:lower:]][_[:alnum:]]*)\((.+)\)$").unwrap();
}

/// An exact stability solver which execution is made by a system command.
///
/// The system command is composed by an executable program, and a potential list of CLI arguments.
/// The theory is written on the standard input of the program using the format of the [LpWriter].
/// The program must write the stable literals on its standard output as atoms like `defended(a)`,
/// on the line following the last `Answer:` line, as `clingo` does in cautious enumeration mode.
///
/// Two lists of options are handled, depending on whether the preferences between rules must be considered.
/// If no option list is given for the preference mode, the default options are used in both cases.
pub struct ExternalStabilitySolver<'a> {
    theory: &'a IncompleteArgumentationTheory<String>,
    program: String,
    options: Vec<String>,
    preference_options: Option<Vec<String>>,
    with_preferences: bool,
}

impl<'a> ExternalStabilitySolver<'a> {
    /// Builds a new external stability solver.
    ///
    /// The `program` argument is the path from a directory in execution path to the software to execute.
    /// The `options` parameter is the CLI options to provide to the software under execution.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use crustiat::iat::IncompleteArgumentationTheory;
    /// # use crustiat::stability::{ExternalStabilitySolver, StabilitySolver};
    /// fn exact_result(theory: &IncompleteArgumentationTheory<String>) {
    ///     let mut solver = ExternalStabilitySolver::new(
    ///         theory,
    ///         "clingo".to_string(),
    ///         vec!["--enum-mode=cautious".to_string(), "-".to_string(), "stability.lp".to_string()],
    ///     );
    ///     println!("{}", solver.compute_stability().unwrap());
    /// }
    /// ```
    pub fn new(
        theory: &'a IncompleteArgumentationTheory<String>,
        program: String,
        options: Vec<String>,
    ) -> Self {
        Self {
            theory,
            program,
            options,
            preference_options: None,
            with_preferences: false,
        }
    }

    /// Sets the options to give to the program when the preferences must be considered.
    pub fn with_preference_options(mut self, preference_options: Vec<String>) -> Self {
        self.preference_options = Some(preference_options);
        self
    }

    /// Sets whether the preferences must be considered.
    pub fn with_preferences(mut self, with_preferences: bool) -> Self {
        self.with_preferences = with_preferences;
        self
    }

    fn current_options(&self) -> &[String] {
        match (&self.preference_options, self.with_preferences) {
            (Some(options), true) => options,
            _ => &self.options,
        }
    }

    fn exec_solver(&self) -> Result<Output> {
        let mut input = Vec::new();
        LpWriter::default()
            .write_theory(self.theory, &mut input)
            .context("while serializing the theory")?;
        let mut child = Command::new(&self.program)
            .args(self.current_options())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("while spawning {}", self.program))?;
        let mut stdin = child
            .stdin
            .take()
            .context("cannot open the standard input of the exact solver")?;
        let input_writer = std::thread::spawn(move || {
            stdin.write_all(&input)?;
            stdin.flush()
        });
        let output = child
            .wait_with_output()
            .context("while waiting for the exact solver")?;
        match input_writer.join() {
            Ok(Err(e)) => log::debug!("the exact solver did not consume its input: {}", e),
            Ok(Ok(())) => {}
            Err(_) => return Err(anyhow!("the thread feeding the exact solver panicked")),
        }
        Ok(output)
    }
}

fn read_answer(output: &str) -> Result<Option<StabilityResult<String>>> {
    let lines = output.lines().collect::<Vec<&str>>();
    let answer_index = match lines.iter().rposition(|l| l.starts_with("Answer:")) {
        Some(i) => i,
        None => return Ok(None),
    };
    let mut result = StabilityResult::default();
    let atoms = lines.get(answer_index + 1).copied().unwrap_or_default();
    for atom in atoms.split_whitespace() {
        let captures = STATUS_ATOM_PATTERN
            .captures(atom)
            .ok_or_else(|| anyhow!("invalid atom in the answer: {}", atom))?;
        result.add_to_result(captures[2].to_string(), &captures[1])?;
    }
    Ok(Some(result))
}

impl StabilitySolver<String> for ExternalStabilitySolver<'_> {
    fn compute_stability(&mut self) -> Result<StabilityResult<String>> {
        let output = self.exec_solver()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        match read_answer(&stdout).context("while reading the output of the exact solver")? {
            Some(result) => {
                log::info!("{} stable literals found by the exact solver", result.n_stable());
                Ok(result)
            }
            None if !output.status.success() => Err(anyhow!(
                "the exact solver exited with {} without providing an answer",
                output.status
            )),
            None => {
                log::warn!("the exact solver provided no answer");
                Ok(StabilityResult::default())
            }
        }
    }
}
