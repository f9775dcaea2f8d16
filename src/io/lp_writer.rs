use crate::iat::IncompleteArgumentationTheory;
use crate::utils::LabelType;
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the line-based theory format.
///
/// This object is used to write an [`IncompleteArgumentationTheory`] using the format read by the [LpReader](super::LpReader).
/// The facts are grouped by kind (literals, queryables, axioms, contraries, rules, preferences), and groups are separated by empty lines.
/// All the names are written in lower case.
///
/// Ordinary premises are not part of the format and are not written.
///
/// # Example
///
/// The following example writes a theory to the standard output.
///
/// ```
/// # use crustiat::iat::IncompleteArgumentationTheory;
/// # use crustiat::io::LpWriter;
/// # use crustiat::utils::LabelType;
/// # use anyhow::Result;
/// fn write_theory_to_stdout<T: LabelType>(theory: &IncompleteArgumentationTheory<T>) -> Result<()> {
///     let writer = LpWriter::default();
///     writer.write_theory(theory, &mut std::io::stdout())
/// }
/// ```
#[derive(Default)]
pub struct LpWriter {}

fn lower<T: LabelType>(t: &T) -> String {
    t.to_string().to_lowercase()
}

impl LpWriter {
    /// Writes a theory to the provided writer.
    pub fn write_theory<T: LabelType>(
        &self,
        theory: &IncompleteArgumentationTheory<T>,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let context = "while writing a theory";
        let system = theory.argumentation_system();
        for literal in system.language().iter() {
            writeln!(writer, "literal({}).", lower(literal.label())).context(context)?;
        }
        writeln!(writer).context(context)?;
        for literal in theory.iter_queryables() {
            writeln!(writer, "queryable({}).", lower(literal.label())).context(context)?;
        }
        writeln!(writer).context(context)?;
        for literal in theory.iter_axioms() {
            writeln!(writer, "axiom({}).", lower(literal.label())).context(context)?;
        }
        writeln!(writer).context(context)?;
        for literal in system.language().iter() {
            for contrary in system.iter_contraries(literal) {
                writeln!(
                    writer,
                    "neg({},{}).",
                    lower(literal.label()),
                    lower(contrary.label())
                )
                .context(context)?;
            }
        }
        writeln!(writer).context(context)?;
        for rule in system.iter_defeasible_rules() {
            let rule_label = lower(rule.label());
            for antecedent in rule.iter_antecedents() {
                writeln!(writer, "body({},{}).", rule_label, lower(antecedent.label()))
                    .context(context)?;
            }
            writeln!(
                writer,
                "head({},{}).",
                rule_label,
                lower(rule.consequent().label())
            )
            .context(context)?;
        }
        writeln!(writer).context(context)?;
        for (preferred, other) in system.iter_rule_preferences() {
            writeln!(
                writer,
                "preferred({},{}).",
                lower(preferred.label()),
                lower(other.label())
            )
            .context(context)?;
        }
        writer.flush().context(context)
    }
}
