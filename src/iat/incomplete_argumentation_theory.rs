use super::{ArgumentationSystem, Language, Literal};
use crate::utils::LabelType;
use anyhow::{anyhow, Context, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KnowledgeType {
    Unknown,
    Axiom,
    OrdinaryPremise,
}

/// An incomplete argumentation theory.
///
/// Such a theory is made of an [ArgumentationSystem], a set of queryable literals (the ones that can be observed)
/// and a knowledge base, which is the set of literals that have already been observed.
/// The knowledge base is partitioned into axioms and ordinary premises.
///
/// The theory takes the ownership of the argumentation system.
/// Literals are not required to be queryable to be put in the knowledge base.
///
/// # Example
///
/// ```
/// # use crustiat::iat::{ArgumentationSystem, IncompleteArgumentationTheory, Language};
/// let language = Language::new_with_labels(&["similar_url", "not_similar_url"]);
/// let mut system = ArgumentationSystem::new_with_language(language);
/// system.new_contradictory(&"similar_url", &"not_similar_url").unwrap();
/// let mut theory = IncompleteArgumentationTheory::new(system);
/// theory.set_queryable(&"similar_url").unwrap();
/// theory.set_queryable(&"not_similar_url").unwrap();
/// theory.new_axiom(&"similar_url").unwrap();
/// let similar_url = theory.language().get_literal(&"similar_url").unwrap();
/// assert!(theory.is_queryable(similar_url));
/// assert!(theory.is_in_knowledge_base(similar_url));
/// ```
#[derive(Clone, Debug)]
pub struct IncompleteArgumentationTheory<T>
where
    T: LabelType,
{
    system: ArgumentationSystem<T>,
    queryables: Vec<usize>,
    is_queryable: Vec<bool>,
    knowledge_base: Vec<usize>,
    knowledge_types: Vec<KnowledgeType>,
}

impl<T> IncompleteArgumentationTheory<T>
where
    T: LabelType,
{
    /// Builds a new theory from an argumentation system.
    ///
    /// The theory has no queryable literal and an empty knowledge base.
    pub fn new(system: ArgumentationSystem<T>) -> Self {
        let n_literals = system.language().len();
        IncompleteArgumentationTheory {
            system,
            queryables: vec![],
            is_queryable: vec![false; n_literals],
            knowledge_base: vec![],
            knowledge_types: vec![KnowledgeType::Unknown; n_literals],
        }
    }

    /// Returns the underlying argumentation system.
    pub fn argumentation_system(&self) -> &ArgumentationSystem<T> {
        &self.system
    }

    /// Returns the language of the underlying argumentation system.
    pub fn language(&self) -> &Language<T> {
        self.system.language()
    }

    /// Sets a literal as queryable.
    ///
    /// Setting a literal queryable twice has no effect.
    /// An error is returned if the literal does not belong to the language.
    pub fn set_queryable(&mut self, literal: &T) -> Result<()> {
        let id = self
            .language()
            .get_literal(literal)
            .with_context(|| format!("cannot set {:?} as queryable", literal))?
            .id();
        if !self.is_queryable[id] {
            self.is_queryable[id] = true;
            self.queryables.push(id);
        }
        Ok(())
    }

    /// Adds a literal to the knowledge base as an axiom.
    ///
    /// An error is returned if the literal does not belong to the language or is already in the knowledge base.
    pub fn new_axiom(&mut self, literal: &T) -> Result<()> {
        self.new_knowledge(literal, KnowledgeType::Axiom)
            .with_context(|| format!("cannot add {:?} as an axiom", literal))
    }

    /// Adds a literal to the knowledge base as an ordinary premise.
    ///
    /// An error is returned if the literal does not belong to the language or is already in the knowledge base.
    pub fn new_ordinary_premise(&mut self, literal: &T) -> Result<()> {
        self.new_knowledge(literal, KnowledgeType::OrdinaryPremise)
            .with_context(|| format!("cannot add {:?} as an ordinary premise", literal))
    }

    fn new_knowledge(&mut self, literal: &T, knowledge_type: KnowledgeType) -> Result<()> {
        let id = self.language().get_literal(literal)?.id();
        if self.knowledge_types[id] != KnowledgeType::Unknown {
            return Err(anyhow!("literal already in the knowledge base"));
        }
        self.knowledge_types[id] = knowledge_type;
        self.knowledge_base.push(id);
        Ok(())
    }

    /// Returns `true` iff the literal is queryable.
    pub fn is_queryable(&self, literal: &Literal<T>) -> bool {
        self.is_queryable_id(literal.id())
    }

    /// Returns `true` iff the literal is an axiom or an ordinary premise.
    pub fn is_in_knowledge_base(&self, literal: &Literal<T>) -> bool {
        self.is_in_knowledge_base_id(literal.id())
    }

    /// Returns `true` iff the literal is an axiom.
    pub fn is_axiom(&self, literal: &Literal<T>) -> bool {
        self.knowledge_types[literal.id()] == KnowledgeType::Axiom
    }

    /// Returns `true` iff the literal is an ordinary premise.
    pub fn is_ordinary_premise(&self, literal: &Literal<T>) -> bool {
        self.knowledge_types[literal.id()] == KnowledgeType::OrdinaryPremise
    }

    pub(crate) fn is_queryable_id(&self, literal_id: usize) -> bool {
        self.is_queryable[literal_id]
    }

    pub(crate) fn is_in_knowledge_base_id(&self, literal_id: usize) -> bool {
        self.knowledge_types[literal_id] != KnowledgeType::Unknown
    }

    /// Iterates over the queryable literals, in the order they were declared.
    pub fn iter_queryables(&self) -> impl Iterator<Item = &Literal<T>> + '_ {
        self.queryables
            .iter()
            .map(|i| self.language().get_literal_by_id(*i))
    }

    /// Returns the number of queryable literals.
    pub fn n_queryables(&self) -> usize {
        self.queryables.len()
    }

    /// Iterates over the literals of the knowledge base, in the order they were added.
    pub fn iter_knowledge_base(&self) -> impl Iterator<Item = &Literal<T>> + '_ {
        self.knowledge_base
            .iter()
            .map(|i| self.language().get_literal_by_id(*i))
    }

    /// Returns the size of the knowledge base.
    pub fn knowledge_base_len(&self) -> usize {
        self.knowledge_base.len()
    }

    /// Iterates over the axioms.
    pub fn iter_axioms(&self) -> impl Iterator<Item = &Literal<T>> + '_ {
        self.iter_knowledge_base().filter(|l| self.is_axiom(l))
    }

    /// Iterates over the ordinary premises.
    pub fn iter_ordinary_premises(&self) -> impl Iterator<Item = &Literal<T>> + '_ {
        self.iter_knowledge_base()
            .filter(|l| self.is_ordinary_premise(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theory() -> IncompleteArgumentationTheory<&'static str> {
        let language = Language::new_with_labels(&["a", "not_a", "b", "c"]);
        let mut system = ArgumentationSystem::new_with_language(language);
        system.new_contradictory(&"a", &"not_a").unwrap();
        system.new_defeasible_rule(&"r1", &"b", &[&"a"]).unwrap();
        IncompleteArgumentationTheory::new(system)
    }

    #[test]
    fn test_queryables() {
        let mut theory = theory();
        theory.set_queryable(&"not_a").unwrap();
        theory.set_queryable(&"a").unwrap();
        theory.set_queryable(&"a").unwrap();
        assert_eq!(2, theory.n_queryables());
        assert_eq!(
            vec!["not_a", "a"],
            theory
                .iter_queryables()
                .map(|l| *l.label())
                .collect::<Vec<_>>()
        );
        let b = theory.language().get_literal(&"b").unwrap();
        assert!(!theory.is_queryable(b));
    }

    #[test]
    fn test_queryable_unknown() {
        let mut theory = theory();
        theory.set_queryable(&"d").unwrap_err();
        assert_eq!(0, theory.n_queryables());
    }

    #[test]
    fn test_knowledge_base() {
        let mut theory = theory();
        theory.new_axiom(&"a").unwrap();
        theory.new_ordinary_premise(&"c").unwrap();
        assert_eq!(2, theory.knowledge_base_len());
        let a = theory.language().get_literal(&"a").unwrap();
        let not_a = theory.language().get_literal(&"not_a").unwrap();
        let c = theory.language().get_literal(&"c").unwrap();
        assert!(theory.is_in_knowledge_base(a));
        assert!(theory.is_axiom(a));
        assert!(!theory.is_ordinary_premise(a));
        assert!(theory.is_in_knowledge_base(c));
        assert!(theory.is_ordinary_premise(c));
        assert!(!theory.is_in_knowledge_base(not_a));
        assert_eq!(
            vec!["a"],
            theory.iter_axioms().map(|l| *l.label()).collect::<Vec<_>>()
        );
        assert_eq!(
            vec!["c"],
            theory
                .iter_ordinary_premises()
                .map(|l| *l.label())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_knowledge_base_twice() {
        let mut theory = theory();
        theory.new_axiom(&"a").unwrap();
        theory.new_axiom(&"a").unwrap_err();
        theory.new_ordinary_premise(&"a").unwrap_err();
        assert_eq!(1, theory.knowledge_base_len());
    }

    #[test]
    fn test_knowledge_base_unknown() {
        let mut theory = theory();
        theory.new_axiom(&"d").unwrap_err();
        theory.new_ordinary_premise(&"d").unwrap_err();
        assert_eq!(0, theory.knowledge_base_len());
    }

    #[test]
    fn test_system_access() {
        let theory = theory();
        assert_eq!(1, theory.argumentation_system().n_defeasible_rules());
        assert_eq!(4, theory.language().len());
    }
}
