use crate::utils::LabelType;
use anyhow::{anyhow, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;

/// Handles a literal of the language.
///
/// Each literal has a label and an identifier which are unique in a language.
/// This uniqueness condition imposes literals are made from [Language] objects, and not directly by the [Literal] struct.
///
/// The type of the labels must be [`LabelType`] instances.
/// The type associated with a literal is the one associated with its language.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Literal<T>
where
    T: LabelType,
{
    id: usize,
    label: T,
}

impl<T> Literal<T>
where
    T: LabelType,
{
    /// Returns the label of the literal.
    pub fn label(&self) -> &T {
        &self.label
    }

    /// Returns the id of the literal.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T> Display for Literal<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Handles the literals that may be used in an argumentation system.
///
/// # Example
///
/// ```
/// # use crustiat::iat::Language;
/// let language = Language::new_with_labels(&["similar_url", "not_similar_url", "typosquatting"]);
/// for (i,l) in language.iter().enumerate() {
///     assert_eq!(i, language.get_literal(l.label()).unwrap().id());
///     assert_eq!(l, language.get_literal_by_id(i));
///     println!("literal {} is {}", i, l.label());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Language<T>
where
    T: LabelType,
{
    literals: Vec<Literal<T>>,
    label_to_id: HashMap<T, usize>,
}

impl<T> Language<T>
where
    T: LabelType,
{
    /// Builds a new language given the labels of the literals.
    ///
    /// Each literal will be assigned an id equal to its index in the provided slice of labels.
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::Language;
    /// let language = Language::new_with_labels(&["a", "b", "a"]);
    /// assert_eq!(2, language.len());
    /// ```
    pub fn new_with_labels(labels: &[T]) -> Self {
        let mut language = Language {
            literals: Vec::with_capacity(labels.len()),
            label_to_id: HashMap::with_capacity(labels.len()),
        };
        labels.iter().for_each(|l| {
            language.new_literal(l.clone());
        });
        language
    }

    /// Adds a new literal to this language and returns its id.
    ///
    /// The id of the new literal is the number of literals that were in the language before the call.
    /// If the label is already present in the language, nothing is added and the id of the existing literal is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::Language;
    /// let mut language = Language::new_with_labels(&["a", "b"]);
    /// assert_eq!(2, language.new_literal("c"));
    /// assert_eq!(2, language.new_literal("c"));
    /// assert_eq!(3, language.len());
    /// ```
    pub fn new_literal(&mut self, label: T) -> usize {
        match self.label_to_id.entry(label.clone()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.literals.len();
                e.insert(id);
                self.literals.push(Literal { id, label });
                id
            }
        }
    }

    /// Returns the number of literals in the language.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` iff the language has no literal.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns `true` iff a literal has this label.
    pub fn contains(&self, label: &T) -> bool {
        self.label_to_id.contains_key(label)
    }

    /// Returns the literal associated to a label.
    ///
    /// An error is returned if no literal corresponds to the provided label.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::Language;
    /// let language = Language::new_with_labels(&["a", "b"]);
    /// assert_eq!(1, language.get_literal(&"b").unwrap().id());
    /// assert!(language.get_literal(&"c").is_err());
    /// ```
    pub fn get_literal(&self, label: &T) -> Result<&Literal<T>> {
        self.label_to_id
            .get(label)
            .map(|i| &self.literals[*i])
            .ok_or_else(|| anyhow!("no such literal: {}", label))
    }

    /// Returns the literal with the corresponding identifier.
    ///
    /// # Panics
    ///
    /// Panics if no literal has the corresponding identifier.
    pub fn get_literal_by_id(&self, id: usize) -> &Literal<T> {
        &self.literals[id]
    }

    /// Provides an iterator to the literals, in increasing order of their ids.
    pub fn iter(&self) -> impl Iterator<Item = &Literal<T>> {
        self.literals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let l = Language::new_with_labels(&labels);
        assert_eq!(3, l.literals.len());
        assert_eq!(3, l.label_to_id.len());
        assert_eq!(3, l.len());
        assert!(!l.is_empty());
        for (i, lit) in l.literals.iter().enumerate() {
            assert_eq!(i, lit.id);
            assert_eq!(labels[i], lit.label);
        }
    }

    #[test]
    fn test_new_empty() {
        let l = Language::new_with_labels(&[] as &[String]);
        assert_eq!(0, l.len());
        assert!(l.is_empty());
    }

    #[test]
    fn test_duplicate_literal() {
        let labels = vec!["a".to_string(), "a".to_string()];
        assert_eq!(1, Language::new_with_labels(&labels).len());
    }

    #[test]
    fn test_new_literal() {
        let mut l = Language::new_with_labels(&["a"]);
        assert!(!l.contains(&"b"));
        assert_eq!(1, l.new_literal("b"));
        assert!(l.contains(&"b"));
        assert_eq!(0, l.new_literal("a"));
        assert_eq!(2, l.len());
    }

    #[test]
    fn test_get_literal_unknown() {
        let l = Language::new_with_labels(&["a"]);
        assert_eq!(
            "no such literal: b",
            l.get_literal(&"b").unwrap_err().to_string()
        );
    }

    #[test]
    fn test_literal_display() {
        let l = Language::new_with_labels(&["fraud"]);
        assert_eq!("fraud", format!("{}", l.get_literal_by_id(0)));
    }
}
