use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// The trait for literal and rule labels.
///
/// Literals and rules may be labeled by any type implementing some traits allowing their use in maps and their display.
/// This trait is just a shortcut used to combine them.
///
/// Simple types like [usize], [&str] and [String] implements [LabelType].
/// Theories read from files use [String] labels.
pub trait LabelType: Clone + Debug + Display + Eq + Hash {}
impl<T: Clone + Debug + Display + Eq + Hash> LabelType for T {}
