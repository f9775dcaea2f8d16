use crate::iat::IncompleteArgumentationTheory;
use crate::utils::LabelType;
use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while parsing a theory.
///
/// The first parameter is the line number (starting at 1), the second one is the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read incomplete argumentation theories.
pub trait InstanceReader<T>
where
    T: LabelType,
{
    /// Reads an [`IncompleteArgumentationTheory`].
    /// The [LabelType](crate::utils::LabelType) of the returned theories depends on the reader.
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::IncompleteArgumentationTheory;
    /// # use crustiat::io::{InstanceReader, LpReader};
    /// fn read_theory_from_str(s: &str) -> IncompleteArgumentationTheory<String> {
    ///     let reader = LpReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid theory")
    /// }
    /// # read_theory_from_str("literal(a).");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<IncompleteArgumentationTheory<T>>;

    /// Adds a callback function to call when warnings are raised while parsing a theory.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
