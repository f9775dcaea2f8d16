use crate::iat::language::{Language, Literal};
use crate::utils::LabelType;
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Clone, Debug)]
struct RuleData<T>
where
    T: LabelType,
{
    label: T,
    antecedents: Vec<usize>,
    consequent: usize,
}

/// A defeasible rule of an argumentation system.
///
/// Rules are views on the data held by their [ArgumentationSystem]; they are obtained from it, and cannot outlive it.
/// The antecedents of a rule form a set: each literal appears at most once, and their order is not significant.
#[derive(Debug)]
pub struct DefeasibleRule<'a, T>
where
    T: LabelType,
{
    id: usize,
    data: &'a RuleData<T>,
    language: &'a Language<T>,
}

impl<'a, T> DefeasibleRule<'a, T>
where
    T: LabelType,
{
    /// Returns the id of the rule.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the label of the rule.
    pub fn label(&self) -> &'a T {
        &self.data.label
    }

    /// Returns the consequent of the rule.
    pub fn consequent(&self) -> &'a Literal<T> {
        self.language.get_literal_by_id(self.data.consequent)
    }

    /// Returns the antecedents of the rule.
    pub fn iter_antecedents(&self) -> impl Iterator<Item = &'a Literal<T>> + 'a {
        let language = self.language;
        self.data
            .antecedents
            .iter()
            .map(move |i| language.get_literal_by_id(*i))
    }

    /// Returns the number of antecedents.
    pub fn n_antecedents(&self) -> usize {
        self.data.antecedents.len()
    }

    pub(crate) fn consequent_id(&self) -> usize {
        self.data.consequent
    }

    pub(crate) fn antecedent_ids(&self) -> &'a [usize] {
        &self.data.antecedents
    }
}

impl<T> Display for DefeasibleRule<'_, T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.label())?;
        for (i, a) in self.iter_antecedents().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", a)?;
        }
        write!(f, " => {}", self.consequent())
    }
}

/// A strict rule of an argumentation system.
///
/// Strict rules are kept in the system for completeness, but they are not considered by the stability computations.
#[derive(Debug)]
pub struct StrictRule<'a, T>
where
    T: LabelType,
{
    rule_ids: &'a (usize, Vec<usize>),
    language: &'a Language<T>,
}

impl<'a, T> StrictRule<'a, T>
where
    T: LabelType,
{
    /// Returns the consequent of the rule.
    pub fn consequent(&self) -> &'a Literal<T> {
        self.language.get_literal_by_id(self.rule_ids.0)
    }

    /// Returns the antecedents of the rule.
    pub fn iter_antecedents(&self) -> impl Iterator<Item = &'a Literal<T>> + 'a {
        let language = self.language;
        self.rule_ids
            .1
            .iter()
            .map(move |i| language.get_literal_by_id(*i))
    }
}

/// Handles an argumentation system.
///
/// [ArgumentationSystem] objects hold a language, the contrariness relation between its literals,
/// the defeasible rules built on top of this language, an optional set of strict rules and a preference preorder over the defeasible rules.
/// Such kind of system is initialized with its language. Contraries and rules are defined after with dedicated methods
/// ensuring the constraints on them (known literals, unique rule labels, ...).
///
/// # Example
///
/// ```
/// # use crustiat::iat::{ArgumentationSystem, Language};
/// let language = Language::new_with_labels(&[
///     "similar_url", "not_similar_url", "typosquatting", "not_typosquatting",
/// ]);
/// let mut system = ArgumentationSystem::new_with_language(language);
/// system.new_contradictory(&"similar_url", &"not_similar_url").unwrap();
/// system.new_contradictory(&"typosquatting", &"not_typosquatting").unwrap();
/// system.new_defeasible_rule(&"r1", &"typosquatting", &[&"similar_url"]).unwrap();
/// assert_eq!(1, system.n_defeasible_rules());
/// ```
#[derive(Clone, Debug)]
pub struct ArgumentationSystem<T>
where
    T: LabelType,
{
    language: Language<T>,
    contraries: Vec<Vec<usize>>,
    defeasible_rules: Vec<RuleData<T>>,
    rule_label_to_id: HashMap<T, usize>,
    strict_rules: Vec<(usize, Vec<usize>)>,
    rule_preferences: Vec<(usize, usize)>,
}

impl<T> ArgumentationSystem<T>
where
    T: LabelType,
{
    /// Builds an argumentation system given its associated language.
    ///
    /// The system has no contraries, no rules and no preferences.
    pub fn new_with_language(language: Language<T>) -> Self {
        let language_len = language.len();
        ArgumentationSystem {
            language,
            contraries: vec![vec![]; language_len],
            defeasible_rules: vec![],
            rule_label_to_id: HashMap::new(),
            strict_rules: vec![],
            rule_preferences: vec![],
        }
    }

    /// Returns the underlying language.
    pub fn language(&self) -> &Language<T> {
        &self.language
    }

    /// Sets a literal as a contrary of another one.
    ///
    /// After this call, `contrary` belongs to the contraries of `literal`; the reverse is not implied.
    /// Registering the same contrary twice has no effect.
    /// An error is returned if one of the labels is unknown, or if they refer to the same literal.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::{ArgumentationSystem, Language};
    /// let mut system = ArgumentationSystem::new_with_language(Language::new_with_labels(&["a", "b"]));
    /// system.new_contrary(&"a", &"b").unwrap();
    /// let a = system.language().get_literal(&"a").unwrap();
    /// let b = system.language().get_literal(&"b").unwrap();
    /// assert_eq!(vec![b], system.iter_contraries(a).collect::<Vec<_>>());
    /// assert_eq!(0, system.iter_contraries(b).count());
    /// ```
    pub fn new_contrary(&mut self, literal: &T, contrary: &T) -> Result<()> {
        let context = || {
            format!(
                "cannot set {:?} as a contrary of {:?}",
                contrary, literal
            )
        };
        let literal_id = self.language.get_literal(literal).with_context(context)?.id();
        let contrary_id = self.language.get_literal(contrary).with_context(context)?.id();
        if literal_id == contrary_id {
            return Err(anyhow!("a literal cannot be its own contrary")).with_context(context);
        }
        if !self.contraries[literal_id].contains(&contrary_id) {
            self.contraries[literal_id].push(contrary_id);
        }
        Ok(())
    }

    /// Sets two literals as contradictories, that is each one is a contrary of the other one.
    ///
    /// See [new_contrary](Self::new_contrary) for the error cases.
    pub fn new_contradictory(&mut self, literal: &T, other: &T) -> Result<()> {
        self.new_contrary(literal, other)?;
        self.new_contrary(other, literal)
    }

    /// Iterates over the contraries and contradictories of a literal.
    pub fn iter_contraries<'a>(
        &'a self,
        literal: &Literal<T>,
    ) -> impl Iterator<Item = &'a Literal<T>> + 'a {
        self.contraries[literal.id()]
            .iter()
            .map(move |i| self.language.get_literal_by_id(*i))
    }

    /// Returns the number of (literal, contrary) couples.
    pub fn n_contraries(&self) -> usize {
        self.contraries.iter().map(|v| v.len()).sum()
    }

    pub(crate) fn contrary_ids(&self, literal_id: usize) -> &[usize] {
        &self.contraries[literal_id]
    }

    /// Adds a defeasible rule to the system.
    ///
    /// The literals are given by their labels; repeated antecedents are considered once.
    /// An error is returned if a literal is not part of the language, or if a rule with the same label already exists.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::{ArgumentationSystem, Language};
    /// let mut system = ArgumentationSystem::new_with_language(Language::new_with_labels(&["a", "b", "c"]));
    /// system.new_defeasible_rule(&"r1", &"c", &[&"a", &"b"]).unwrap();
    /// system.new_defeasible_rule(&"r2", &"a", &[]).unwrap();
    /// system.new_defeasible_rule(&"r2", &"b", &[]).unwrap_err();
    /// system.new_defeasible_rule(&"r3", &"d", &[&"a"]).unwrap_err();
    /// ```
    pub fn new_defeasible_rule(&mut self, label: &T, consequent: &T, antecedents: &[&T]) -> Result<()> {
        let context = || {
            format!(
                "cannot add a rule {:?} with {:?} as consequent and {:?} as antecedents",
                label, consequent, antecedents
            )
        };
        if self.rule_label_to_id.contains_key(label) {
            return Err(anyhow!("a rule with the same label already exists")).with_context(context);
        }
        let antecedent_ids = self.literal_ids(antecedents).with_context(context)?;
        let consequent_id = self.language.get_literal(consequent).with_context(context)?.id();
        self.rule_label_to_id
            .insert(label.clone(), self.defeasible_rules.len());
        self.defeasible_rules.push(RuleData {
            label: label.clone(),
            antecedents: antecedent_ids,
            consequent: consequent_id,
        });
        Ok(())
    }

    fn literal_ids(&self, labels: &[&T]) -> Result<Vec<usize>> {
        let mut ids = Vec::with_capacity(labels.len());
        for l in labels {
            let id = self.language.get_literal(l)?.id();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Returns the number of defeasible rules.
    pub fn n_defeasible_rules(&self) -> usize {
        self.defeasible_rules.len()
    }

    /// Provides an iterator to the defeasible rules, in increasing order of their ids.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::ArgumentationSystem;
    /// # use crustiat::utils::LabelType;
    /// fn debug_rules<T: LabelType>(system: &ArgumentationSystem<T>) {
    ///     for r in system.iter_defeasible_rules() {
    ///         println!("rule {}: {}", r.id(), r);
    ///     }
    /// }
    /// ```
    pub fn iter_defeasible_rules(&self) -> impl Iterator<Item = DefeasibleRule<'_, T>> + '_ {
        (0..self.defeasible_rules.len()).map(|i| self.get_defeasible_rule_by_id(i))
    }

    /// Returns the defeasible rule with the given label.
    ///
    /// An error is returned if no rule has this label.
    pub fn get_defeasible_rule(&self, label: &T) -> Result<DefeasibleRule<'_, T>> {
        self.rule_label_to_id
            .get(label)
            .map(|i| self.get_defeasible_rule_by_id(*i))
            .ok_or_else(|| anyhow!("no such rule: {}", label))
    }

    /// Returns the defeasible rule with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the provided id does not refer to an existing rule.
    pub fn get_defeasible_rule_by_id(&self, id: usize) -> DefeasibleRule<'_, T> {
        DefeasibleRule {
            id,
            data: &self.defeasible_rules[id],
            language: &self.language,
        }
    }

    /// Adds a strict rule to the system.
    ///
    /// An error is returned if a literal is not part of the language.
    pub fn new_strict_rule(&mut self, consequent: &T, antecedents: &[&T]) -> Result<()> {
        let context = || {
            format!(
                "cannot add a strict rule with {:?} as consequent and {:?} as antecedents",
                consequent, antecedents
            )
        };
        let antecedent_ids = self.literal_ids(antecedents).with_context(context)?;
        let consequent_id = self.language.get_literal(consequent).with_context(context)?.id();
        self.strict_rules.push((consequent_id, antecedent_ids));
        Ok(())
    }

    /// Returns the number of strict rules.
    pub fn n_strict_rules(&self) -> usize {
        self.strict_rules.len()
    }

    /// Provides an iterator to the strict rules.
    pub fn iter_strict_rules(&self) -> impl Iterator<Item = StrictRule<'_, T>> + '_ {
        self.strict_rules.iter().map(|r| StrictRule {
            rule_ids: r,
            language: &self.language,
        })
    }

    /// Declares a defeasible rule to be at least as preferred as another one.
    ///
    /// The preference preorder is reflexive; declaring a rule preferred to itself is allowed.
    /// Declaring the same couple twice has no effect.
    /// An error is returned if one of the labels does not refer to a rule.
    pub fn new_rule_preference(&mut self, preferred: &T, other: &T) -> Result<()> {
        let context = || format!("cannot prefer rule {:?} to rule {:?}", preferred, other);
        let preferred_id = self.get_defeasible_rule(preferred).with_context(context)?.id();
        let other_id = self.get_defeasible_rule(other).with_context(context)?.id();
        if !self.rule_preferences.contains(&(preferred_id, other_id)) {
            self.rule_preferences.push((preferred_id, other_id));
        }
        Ok(())
    }

    /// Returns `true` iff the first rule has been declared as preferred to the second one, or if both are the same rule.
    pub fn is_preferred(&self, preferred: &DefeasibleRule<T>, other: &DefeasibleRule<T>) -> bool {
        preferred.id() == other.id()
            || self
                .rule_preferences
                .contains(&(preferred.id(), other.id()))
    }

    /// Iterates over the declared preferences, as couples (preferred rule, other rule).
    pub fn iter_rule_preferences(
        &self,
    ) -> impl Iterator<Item = (DefeasibleRule<'_, T>, DefeasibleRule<'_, T>)> + '_ {
        self.rule_preferences.iter().map(|(p, o)| {
            (
                self.get_defeasible_rule_by_id(*p),
                self.get_defeasible_rule_by_id(*o),
            )
        })
    }

    /// Adds a literal for each defeasible rule, labelled by the rule label.
    ///
    /// These literals allow rules to depend on the application of other rules.
    /// An error is returned if a literal of the language already has the label of a rule; in this case, no literal is added.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::iat::{ArgumentationSystem, Language};
    /// let mut system = ArgumentationSystem::new_with_language(Language::new_with_labels(&["a", "b"]));
    /// system.new_defeasible_rule(&"r1", &"b", &[&"a"]).unwrap();
    /// system.reify_defeasible_rules().unwrap();
    /// assert_eq!(3, system.language().len());
    /// let r1 = system.get_defeasible_rule(&"r1").unwrap();
    /// assert_eq!(&"r1", system.get_rule_literal(&r1).unwrap().label());
    /// ```
    pub fn reify_defeasible_rules(&mut self) -> Result<()> {
        if let Some(r) = self
            .defeasible_rules
            .iter()
            .find(|r| self.language.contains(&r.label))
        {
            return Err(anyhow!(
                "cannot reify rule {:?}: a literal already has this label",
                r.label
            ));
        }
        for r in self.defeasible_rules.iter() {
            self.language.new_literal(r.label.clone());
        }
        self.contraries.resize(self.language.len(), vec![]);
        Ok(())
    }

    /// Returns the literal reifying a defeasible rule.
    ///
    /// An error is returned if the rules have not been reified (see [reify_defeasible_rules](Self::reify_defeasible_rules)).
    pub fn get_rule_literal(&self, rule: &DefeasibleRule<T>) -> Result<&Literal<T>> {
        self.language
            .get_literal(rule.label())
            .context("the rule has not been reified")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn police_system() -> ArgumentationSystem<&'static str> {
        let l = Language::new_with_labels(&[
            "similar_url",
            "not_similar_url",
            "typosquatting",
            "not_typosquatting",
            "fraud",
        ]);
        let mut system = ArgumentationSystem::new_with_language(l);
        system
            .new_contradictory(&"similar_url", &"not_similar_url")
            .unwrap();
        system
            .new_contradictory(&"typosquatting", &"not_typosquatting")
            .unwrap();
        system
            .new_defeasible_rule(&"r1", &"typosquatting", &[&"similar_url"])
            .unwrap();
        system
            .new_defeasible_rule(&"r2", &"fraud", &[&"typosquatting"])
            .unwrap();
        system
    }

    fn labels<'a>(it: impl Iterator<Item = &'a Literal<&'static str>>) -> Vec<&'static str> {
        it.map(|l| *l.label()).collect()
    }

    #[test]
    fn test_contradictories() {
        let system = police_system();
        let similar_url = system.language().get_literal(&"similar_url").unwrap();
        let not_similar_url = system.language().get_literal(&"not_similar_url").unwrap();
        let fraud = system.language().get_literal(&"fraud").unwrap();
        assert_eq!(
            vec!["not_similar_url"],
            labels(system.iter_contraries(similar_url))
        );
        assert_eq!(
            vec!["similar_url"],
            labels(system.iter_contraries(not_similar_url))
        );
        assert_eq!(0, system.iter_contraries(fraud).count());
        assert_eq!(4, system.n_contraries());
    }

    #[test]
    fn test_contrary_twice() {
        let mut system = police_system();
        system.new_contrary(&"fraud", &"typosquatting").unwrap();
        system.new_contrary(&"fraud", &"typosquatting").unwrap();
        assert_eq!(5, system.n_contraries());
    }

    #[test]
    fn test_own_contrary() {
        let mut system = police_system();
        system.new_contrary(&"fraud", &"fraud").unwrap_err();
    }

    #[test]
    fn test_contrary_unknown_literal() {
        let mut system = police_system();
        system.new_contrary(&"fraud", &"not_fraud").unwrap_err();
        system.new_contrary(&"not_fraud", &"fraud").unwrap_err();
    }

    #[test]
    fn test_rules() {
        let system = police_system();
        assert_eq!(2, system.n_defeasible_rules());
        let rules = system.iter_defeasible_rules().collect::<Vec<_>>();
        assert_eq!(&"r1", rules[0].label());
        assert_eq!(&"typosquatting", rules[0].consequent().label());
        assert_eq!(vec!["similar_url"], labels(rules[0].iter_antecedents()));
        assert_eq!(1, rules[1].id());
        assert_eq!("r2: typosquatting => fraud", format!("{}", rules[1]));
    }

    #[test]
    fn test_rule_repeated_antecedents() {
        let mut system = police_system();
        system
            .new_defeasible_rule(&"r3", &"fraud", &[&"similar_url", &"similar_url"])
            .unwrap();
        let r3 = system.get_defeasible_rule(&"r3").unwrap();
        assert_eq!(1, r3.n_antecedents());
        assert_eq!(&[0], r3.antecedent_ids());
    }

    #[test]
    fn test_rule_errors() {
        let mut system = police_system();
        system
            .new_defeasible_rule(&"r1", &"fraud", &[&"similar_url"])
            .unwrap_err();
        system
            .new_defeasible_rule(&"r3", &"not_fraud", &[&"similar_url"])
            .unwrap_err();
        system
            .new_defeasible_rule(&"r3", &"fraud", &[&"not_fraud"])
            .unwrap_err();
        assert_eq!(2, system.n_defeasible_rules());
        system.get_defeasible_rule(&"r3").unwrap_err();
    }

    #[test]
    fn test_strict_rules() {
        let mut system = police_system();
        system.new_strict_rule(&"fraud", &[&"not_typosquatting"]).unwrap();
        system.new_strict_rule(&"not_fraud", &[]).unwrap_err();
        assert_eq!(1, system.n_strict_rules());
        let rule = system.iter_strict_rules().next().unwrap();
        assert_eq!(&"fraud", rule.consequent().label());
        assert_eq!(vec!["not_typosquatting"], labels(rule.iter_antecedents()));
    }

    #[test]
    fn test_preferences() {
        let mut system = police_system();
        system.new_rule_preference(&"r1", &"r2").unwrap();
        system.new_rule_preference(&"r1", &"r2").unwrap();
        system.new_rule_preference(&"r1", &"r3").unwrap_err();
        let r1 = system.get_defeasible_rule(&"r1").unwrap();
        let r2 = system.get_defeasible_rule(&"r2").unwrap();
        assert!(system.is_preferred(&r1, &r2));
        assert!(!system.is_preferred(&r2, &r1));
        assert!(system.is_preferred(&r2, &r2));
        assert_eq!(
            vec![("r1", "r2")],
            system
                .iter_rule_preferences()
                .map(|(p, o)| (*p.label(), *o.label()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_reify() {
        let mut system = police_system();
        system.reify_defeasible_rules().unwrap();
        assert_eq!(7, system.language().len());
        let r2 = system.get_defeasible_rule(&"r2").unwrap();
        let r2_literal = system.get_rule_literal(&r2).unwrap();
        assert_eq!(6, r2_literal.id());
        assert_eq!(0, system.iter_contraries(r2_literal).count());
    }

    #[test]
    fn test_reify_collision() {
        let l = Language::new_with_labels(&["a", "r1"]);
        let mut system = ArgumentationSystem::new_with_language(l);
        system.new_defeasible_rule(&"r1", &"a", &[]).unwrap();
        system.reify_defeasible_rules().unwrap_err();
        assert_eq!(2, system.language().len());
    }

    #[test]
    fn test_rule_literal_not_reified() {
        let system = police_system();
        let r1 = system.get_defeasible_rule(&"r1").unwrap();
        system.get_rule_literal(&r1).unwrap_err();
    }
}
