use crate::iat::IncompleteArgumentationTheory;
use crate::stability::{StabilityLabels, StabilityResult};
use crate::utils::LabelType;
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the results of the stability solvers.
///
/// Results are written as four lines, one per status, listing the stable literals in lexicographic order:
///
/// ```text
/// unsatisfiable: not_similar_url
/// defended: similar_url
/// out:
/// blocked:
/// ```
#[derive(Default)]
pub struct ResultWriter {}

impl ResultWriter {
    /// Writes the stable literals.
    pub fn write_result<T: LabelType>(
        &self,
        result: &StabilityResult<T>,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let context = "while writing a stability result";
        writeln!(writer, "{}", result).context(context)?;
        writer.flush().context(context)
    }

    /// Writes the labels of the literals and the rules, one per line.
    ///
    /// Each line gives the kind of element, its label, and the statuses that remain possible.
    pub fn write_labels<T: LabelType>(
        &self,
        theory: &IncompleteArgumentationTheory<T>,
        labels: &StabilityLabels,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let context = "while writing stability labels";
        for literal in theory.language().iter() {
            writeln!(writer, "literal {} {}", literal, labels.literal_label(literal))
                .context(context)?;
        }
        for rule in theory.argumentation_system().iter_defeasible_rules() {
            writeln!(writer, "rule {} {}", rule.label(), labels.rule_label(&rule))
                .context(context)?;
        }
        writer.flush().context(context)
    }
}
