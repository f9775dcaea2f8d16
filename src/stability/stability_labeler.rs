use super::{
    DependencyGraph, SatisfiabilityLabeler, StabilityLabel, StabilityLabels, StabilityResult,
    StabilitySolver, Status,
};
use crate::iat::IncompleteArgumentationTheory;
use crate::utils::LabelType;
use anyhow::{anyhow, Result};
use std::collections::VecDeque;

/// Statistics about a narrowing computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NarrowingStats {
    n_rule_visits: usize,
    n_flag_flips: usize,
}

impl NarrowingStats {
    /// Returns the number of times a rule was taken from the worklist.
    pub fn n_rule_visits(&self) -> usize {
        self.n_rule_visits
    }

    /// Returns the number of statuses that were excluded from the labels.
    pub fn n_flag_flips(&self) -> usize {
        self.n_flag_flips
    }
}

struct RuleWorklist {
    queue: VecDeque<usize>,
    in_queue: Vec<bool>,
}

impl RuleWorklist {
    fn new(n_rules: usize) -> Self {
        RuleWorklist {
            queue: VecDeque::with_capacity(n_rules),
            in_queue: vec![false; n_rules],
        }
    }

    fn push(&mut self, rule_id: usize) {
        if !self.in_queue[rule_id] {
            self.in_queue[rule_id] = true;
            self.queue.push_back(rule_id);
        }
    }

    fn extend(&mut self, rule_ids: &[usize]) {
        rule_ids.iter().for_each(|r| self.push(*r));
    }

    fn pop(&mut self) -> Option<usize> {
        let rule_id = self.queue.pop_front()?;
        self.in_queue[rule_id] = false;
        Some(rule_id)
    }
}

/// An approximation algorithm for the stability of the literals of an incomplete argumentation theory.
///
/// The labeler starts from the labels given by a [SatisfiabilityLabeler] and narrows them until a fixpoint is reached.
/// The literals that are neither leaves nor queryable only get colored when one of the rules concluding them,
/// or one of the rules concluding one of their contraries, is visited.
/// A rule is visited each time one of its antecedents changes.
///
/// Each label may only lose statuses, so the computation ends after at most four times
/// the number of literals and rules flag changes.
/// The result is sound but incomplete: a literal that is reported as stable is stable,
/// but some stable literals may remain undetected.
/// Preferences between rules are not considered.
///
/// # Example
///
/// ```
/// # use crustiat::iat::{ArgumentationSystem, IncompleteArgumentationTheory, Language};
/// # use crustiat::stability::{StabilityLabeler, StabilitySolver, Status};
/// let language = Language::new_with_labels(&["similar_url", "not_similar_url"]);
/// let mut system = ArgumentationSystem::new_with_language(language);
/// system.new_contradictory(&"similar_url", &"not_similar_url").unwrap();
/// let mut theory = IncompleteArgumentationTheory::new(system);
/// theory.set_queryable(&"similar_url").unwrap();
/// theory.set_queryable(&"not_similar_url").unwrap();
/// theory.new_axiom(&"similar_url").unwrap();
/// let mut labeler = StabilityLabeler::new(&theory);
/// let result = labeler.compute_stability().unwrap();
/// assert_eq!(Some(Status::Defended), result.status_of(&"similar_url"));
/// assert_eq!(Some(Status::Unsatisfiable), result.status_of(&"not_similar_url"));
/// ```
pub struct StabilityLabeler<'a, T>
where
    T: LabelType,
{
    theory: &'a IncompleteArgumentationTheory<T>,
    graph: DependencyGraph,
}

impl<'a, T> StabilityLabeler<'a, T>
where
    T: LabelType,
{
    /// Builds a new labeler for the given theory.
    pub fn new(theory: &'a IncompleteArgumentationTheory<T>) -> Self {
        StabilityLabeler {
            theory,
            graph: DependencyGraph::new(theory.argumentation_system()),
        }
    }

    /// Returns the dependency graph of the theory.
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Computes the labels of all the literals and rules of the theory.
    ///
    /// An error is returned if a label loses all its statuses, which happens on theories with inconsistent knowledge bases.
    pub fn compute_labels(&self) -> Result<StabilityLabels> {
        let mut labels = SatisfiabilityLabeler::new(self.theory).compute_labels();
        self.narrow_labels(&mut labels)?;
        Ok(labels)
    }

    /// Narrows the provided labels until a fixpoint is reached.
    ///
    /// The labels must have been computed for the theory of this labeler.
    /// Narrowing a set of labels that is already a fixpoint leaves it unchanged.
    pub fn narrow_labels(&self, labels: &mut StabilityLabels) -> Result<NarrowingStats> {
        let system = self.theory.argumentation_system();
        let mut stats = NarrowingStats::default();
        let mut worklist = RuleWorklist::new(system.n_defeasible_rules());
        let mut visited = vec![false; system.n_defeasible_rules()];
        for literal in system.language().iter() {
            let id = literal.id();
            if self.graph.is_leaf(id) || self.theory.is_queryable_id(id) {
                stats.n_flag_flips += self.color_literal(labels, id)?;
                worklist.extend(self.graph.parent_ids(id));
            }
        }
        system
            .iter_defeasible_rules()
            .filter(|r| r.n_antecedents() == 0)
            .for_each(|r| worklist.push(r.id()));
        while let Some(rule_id) = worklist.pop() {
            stats.n_rule_visits += 1;
            let rule_flips = self.color_rule(labels, rule_id)?;
            stats.n_flag_flips += rule_flips;
            if visited[rule_id] && rule_flips == 0 {
                continue;
            }
            visited[rule_id] = true;
            let consequent = system.get_defeasible_rule_by_id(rule_id).consequent_id();
            let consequent_flips = self.color_literal(labels, consequent)?;
            if consequent_flips > 0 {
                stats.n_flag_flips += consequent_flips;
                worklist.extend(self.graph.parent_ids(consequent));
            }
            let contraries = system.contrary_ids(consequent);
            let attacked = self.graph.attacked_ids(consequent);
            let opponents = contraries
                .iter()
                .chain(attacked.iter().filter(|a| !contraries.contains(*a)));
            for opponent in opponents {
                let flips = self.color_literal(labels, *opponent)?;
                if flips > 0 {
                    stats.n_flag_flips += flips;
                    worklist.extend(self.graph.parent_ids(*opponent));
                }
            }
        }
        log::debug!(
            "narrowing done with {} rule visits and {} flag flips",
            stats.n_rule_visits,
            stats.n_flag_flips
        );
        Ok(stats)
    }

    fn color_rule(&self, labels: &mut StabilityLabels, rule_id: usize) -> Result<usize> {
        let rule = self
            .theory
            .argumentation_system()
            .get_defeasible_rule_by_id(rule_id);
        let antecedents = || {
            rule.antecedent_ids()
                .iter()
                .map(|a| labels.literal_label_by_id(*a))
        };
        let mut excluded = Vec::with_capacity(4);
        if antecedents().all(|l| !l.can_be(Status::Unsatisfiable)) {
            excluded.push(Status::Unsatisfiable);
        }
        if antecedents().any(|l| !l.can_be(Status::Defended)) {
            excluded.push(Status::Defended);
        }
        if antecedents().all(|l| !l.can_be(Status::Out)) {
            excluded.push(Status::Out);
        }
        if antecedents().all(|l| !l.can_be(Status::Blocked))
            || antecedents().any(|l| !l.can_be(Status::Blocked) && !l.can_be(Status::Defended))
        {
            excluded.push(Status::Blocked);
        }
        let label = labels.rule_label_by_id_mut(rule_id);
        let flips = exclude_all(label, &excluded);
        if label.is_contradictory() {
            return Err(anyhow!(
                "rule {} has no possible status left",
                rule.label()
            ));
        }
        if flips > 0 {
            log::trace!("rule {} narrowed to {}", rule.label(), label);
        }
        Ok(flips)
    }

    fn color_literal(&self, labels: &mut StabilityLabels, literal_id: usize) -> Result<usize> {
        let system = self.theory.argumentation_system();
        let queryable = self.theory.is_queryable_id(literal_id);
        let observed = self.theory.is_in_knowledge_base_id(literal_id);
        let contraries = system.contrary_ids(literal_id);
        let children = || {
            self.graph
                .children_ids(literal_id)
                .iter()
                .map(|r| labels.rule_label_by_id(*r))
        };
        let contrary_rules = || {
            contraries
                .iter()
                .flat_map(|c| self.graph.children_ids(*c))
                .map(|r| labels.rule_label_by_id(*r))
        };
        let mut excluded = Vec::with_capacity(4);
        if (queryable && observed) || children().any(|l| !l.can_be(Status::Unsatisfiable)) {
            excluded.push(Status::Unsatisfiable);
        }
        let cannot_be_defended = if queryable {
            contraries
                .iter()
                .any(|c| self.theory.is_in_knowledge_base_id(*c))
        } else {
            children().all(|l| !l.can_be(Status::Defended))
                || contrary_rules()
                    .any(|l| !l.can_be(Status::Unsatisfiable) && !l.can_be(Status::Out))
        };
        if cannot_be_defended {
            excluded.push(Status::Defended);
        }
        let out_decided_by_children = || {
            children().all(|l| !l.can_be(Status::Out))
                || children().any(|l| !l.can_be(Status::Unsatisfiable) && !l.can_be(Status::Out))
        };
        let cannot_be_out = if queryable {
            observed
                || (contraries.iter().all(|c| {
                    system
                        .contrary_ids(*c)
                        .iter()
                        .any(|cc| self.theory.is_in_knowledge_base_id(*cc))
                }) && out_decided_by_children())
        } else {
            out_decided_by_children()
        };
        if cannot_be_out
            || children().all(|l| {
                !l.can_be(Status::Defended) && !l.can_be(Status::Out) && !l.can_be(Status::Blocked)
            })
        {
            excluded.push(Status::Out);
        }
        let cannot_be_blocked = queryable
            || children().all(|l| !l.can_be(Status::Defended) && !l.can_be(Status::Blocked))
            || (contrary_rules()
                .all(|l| !l.can_be(Status::Blocked) && !l.can_be(Status::Defended))
                && (children().all(|l| !l.can_be(Status::Blocked))
                    || children().any(|l| {
                        !l.can_be(Status::Unsatisfiable)
                            && !l.can_be(Status::Out)
                            && !l.can_be(Status::Blocked)
                    })));
        if cannot_be_blocked {
            excluded.push(Status::Blocked);
        }
        let label = labels.literal_label_by_id_mut(literal_id);
        let flips = exclude_all(label, &excluded);
        let literal = system.language().get_literal_by_id(literal_id);
        if label.is_contradictory() {
            return Err(anyhow!("literal {} has no possible status left", literal));
        }
        if flips > 0 {
            log::trace!("literal {} narrowed to {}", literal, label);
        }
        Ok(flips)
    }
}

fn exclude_all(label: &mut StabilityLabel, statuses: &[Status]) -> usize {
    statuses.iter().filter(|s| label.exclude(**s)).count()
}

impl<T> StabilitySolver<T> for StabilityLabeler<'_, T>
where
    T: LabelType,
{
    fn compute_stability(&mut self) -> Result<StabilityResult<T>> {
        let labels = self.compute_labels()?;
        let result = labels.to_stability_result(self.theory.language());
        log::info!("{} stable literals found", result.n_stable());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iat::{ArgumentationSystem, Language};
    use paste::paste;
    use strum::IntoEnumIterator;

    type Theory = IncompleteArgumentationTheory<&'static str>;

    fn theory(
        literals: &[&'static str],
        contradictories: &[(&'static str, &'static str)],
        rules: &[(&'static str, &'static str, &[&'static str])],
        queryables: &[&'static str],
        axioms: &[&'static str],
    ) -> Theory {
        let language = Language::new_with_labels(literals);
        let mut system = ArgumentationSystem::new_with_language(language);
        for (a, b) in contradictories {
            system.new_contradictory(a, b).unwrap();
        }
        for (label, consequent, antecedents) in rules {
            let antecedents = antecedents.iter().collect::<Vec<_>>();
            system
                .new_defeasible_rule(label, consequent, &antecedents)
                .unwrap();
        }
        let mut theory = IncompleteArgumentationTheory::new(system);
        for q in queryables {
            theory.set_queryable(q).unwrap();
        }
        for a in axioms {
            theory.new_axiom(a).unwrap();
        }
        theory
    }

    const POLICE_LITERALS: [&str; 10] = [
        "similar_url",
        "not_similar_url",
        "typosquatting",
        "not_typosquatting",
        "too_cheap",
        "not_too_cheap",
        "trusted",
        "not_trusted",
        "fraud",
        "not_fraud",
    ];

    const POLICE_CONTRADICTORIES: [(&str, &str); 5] = [
        ("similar_url", "not_similar_url"),
        ("typosquatting", "not_typosquatting"),
        ("too_cheap", "not_too_cheap"),
        ("trusted", "not_trusted"),
        ("fraud", "not_fraud"),
    ];

    const POLICE_QUERYABLES: [&str; 6] = [
        "similar_url",
        "not_similar_url",
        "too_cheap",
        "not_too_cheap",
        "trusted",
        "not_trusted",
    ];

    fn police_theory() -> Theory {
        theory(
            &POLICE_LITERALS,
            &POLICE_CONTRADICTORIES,
            &[
                ("r1", "typosquatting", &["similar_url"]),
                ("r2", "fraud", &["typosquatting"]),
                ("r3", "fraud", &["too_cheap"]),
            ],
            &POLICE_QUERYABLES,
            &["similar_url", "trusted"],
        )
    }

    fn conflict_theory() -> Theory {
        theory(
            &POLICE_LITERALS,
            &POLICE_CONTRADICTORIES,
            &[
                ("r1", "typosquatting", &["similar_url"]),
                ("r2", "fraud", &["typosquatting"]),
                ("r3", "fraud", &["too_cheap"]),
                ("r4", "not_fraud", &["trusted"]),
            ],
            &POLICE_QUERYABLES,
            &["similar_url", "trusted"],
        )
    }

    fn out_theory() -> Theory {
        theory(
            &["a", "not_a", "b", "not_b", "l", "not_l"],
            &[("a", "not_a"), ("b", "not_b"), ("l", "not_l")],
            &[("r1", "b", &["a"]), ("r2", "l", &["b"])],
            &["a", "not_a", "b", "not_b"],
            &["a", "not_b"],
        )
    }

    fn isolated_theory() -> Theory {
        theory(&["a"], &[], &[], &[], &[])
    }

    fn empty_rule_theory() -> Theory {
        theory(
            &["e", "not_e"],
            &[("e", "not_e")],
            &[("r0", "e", &[])],
            &[],
            &[],
        )
    }

    fn chain_theory() -> Theory {
        theory(
            &["p0", "p1", "p2", "p3"],
            &[],
            &[("r0", "p1", &["p0"]), ("r1", "p2", &["p1"]), ("r2", "p3", &["p2"])],
            &["p0"],
            &["p0"],
        )
    }

    fn cycle_theory() -> Theory {
        theory(
            &["p0", "p1", "p2", "p3"],
            &[],
            &[
                ("r0", "p1", &["p0"]),
                ("r1", "p2", &["p1"]),
                ("r2", "p3", &["p2"]),
                ("r3", "p1", &["p3"]),
            ],
            &["p0"],
            &["p0"],
        )
    }

    fn expected_result(
        unsatisfiable: &[&'static str],
        defended: &[&'static str],
        out: &[&'static str],
        blocked: &[&'static str],
    ) -> StabilityResult<&'static str> {
        let mut result = StabilityResult::default();
        for (literals, status) in [
            (unsatisfiable, Status::Unsatisfiable),
            (defended, Status::Defended),
            (out, Status::Out),
            (blocked, Status::Blocked),
        ] {
            literals.iter().for_each(|l| result.insert(*l, status));
        }
        result
    }

    fn literal_label<'a>(
        theory: &Theory,
        labels: &'a StabilityLabels,
        label: &'static str,
    ) -> &'a StabilityLabel {
        labels.literal_label(theory.language().get_literal(&label).unwrap())
    }

    fn rule_label<'a>(
        theory: &Theory,
        labels: &'a StabilityLabels,
        label: &'static str,
    ) -> &'a StabilityLabel {
        labels.rule_label(&theory.argumentation_system().get_defeasible_rule(&label).unwrap())
    }

    #[test]
    fn test_police() {
        let theory = police_theory();
        let mut labeler = StabilityLabeler::new(&theory);
        let result = labeler.compute_stability().unwrap();
        assert_eq!(
            expected_result(
                &["not_similar_url", "not_typosquatting", "not_trusted", "not_fraud"],
                &["similar_url", "typosquatting", "trusted", "fraud"],
                &[],
                &[]
            ),
            result
        );
        let labels = labeler.compute_labels().unwrap();
        let undecided = StabilityLabel::new(true, true, false, false);
        assert_eq!(&undecided, literal_label(&theory, &labels, "too_cheap"));
        assert_eq!(&undecided, literal_label(&theory, &labels, "not_too_cheap"));
        assert_eq!(&undecided, rule_label(&theory, &labels, "r3"));
    }

    #[test]
    fn test_police_dependency_graph() {
        let theory = police_theory();
        let labeler = StabilityLabeler::new(&theory);
        let graph = labeler.dependency_graph();
        let literal_id = |l: &'static str| theory.language().get_literal(&l).unwrap().id();
        let rule_id = |r: &'static str| {
            theory
                .argumentation_system()
                .get_defeasible_rule(&r)
                .unwrap()
                .id()
        };
        assert!(graph.is_leaf(literal_id("similar_url")));
        assert!(graph.is_leaf(literal_id("not_fraud")));
        assert!(!graph.is_leaf(literal_id("typosquatting")));
        assert_eq!(&[rule_id("r1")], graph.parent_ids(literal_id("similar_url")));
        assert_eq!(&[rule_id("r2")], graph.parent_ids(literal_id("typosquatting")));
        assert!(graph.parent_ids(literal_id("fraud")).is_empty());
        assert_eq!(
            &[rule_id("r2"), rule_id("r3")],
            graph.children_ids(literal_id("fraud"))
        );
        assert_eq!(&[literal_id("not_fraud")], graph.attacked_ids(literal_id("fraud")));
    }

    #[test]
    fn test_police_single_observation() {
        let theory = theory(
            &["similar_url", "not_similar_url"],
            &[("similar_url", "not_similar_url")],
            &[],
            &["similar_url", "not_similar_url"],
            &["similar_url"],
        );
        let result = StabilityLabeler::new(&theory).compute_stability().unwrap();
        assert_eq!(
            expected_result(&["not_similar_url"], &["similar_url"], &[], &[]),
            result
        );
    }

    #[test]
    fn test_conflict() {
        let theory = conflict_theory();
        let result = StabilityLabeler::new(&theory).compute_stability().unwrap();
        assert_eq!(
            expected_result(
                &["not_similar_url", "not_typosquatting", "not_trusted"],
                &["similar_url", "typosquatting", "trusted"],
                &[],
                &["fraud", "not_fraud"]
            ),
            result
        );
    }

    #[test]
    fn test_out() {
        let theory = out_theory();
        let result = StabilityLabeler::new(&theory).compute_stability().unwrap();
        assert_eq!(
            expected_result(&["not_a", "not_l"], &["a", "not_b"], &["b", "l"], &[]),
            result
        );
    }

    #[test]
    fn test_isolated_literal() {
        let theory = isolated_theory();
        let labeler = StabilityLabeler::new(&theory);
        let labels = labeler.compute_labels().unwrap();
        assert_eq!(
            &StabilityLabel::unsatisfiable_only(),
            literal_label(&theory, &labels, "a")
        );
    }

    #[test]
    fn test_empty_rule() {
        let theory = empty_rule_theory();
        let labels = StabilityLabeler::new(&theory).compute_labels().unwrap();
        assert_eq!(
            Some(Status::Defended),
            literal_label(&theory, &labels, "e").stable_status()
        );
        assert_eq!(
            &StabilityLabel::new(false, true, false, false),
            rule_label(&theory, &labels, "r0")
        );
        assert_eq!(
            Some(Status::Unsatisfiable),
            literal_label(&theory, &labels, "not_e").stable_status()
        );
    }

    #[test]
    fn test_chains() {
        for theory in [chain_theory(), cycle_theory()] {
            let result = StabilityLabeler::new(&theory).compute_stability().unwrap();
            assert_eq!(
                expected_result(&[], &["p0", "p1", "p2", "p3"], &[], &[]),
                result
            );
        }
    }

    #[test]
    fn test_inconsistent_knowledge_base() {
        let theory = theory(
            &["a", "not_a"],
            &[("a", "not_a")],
            &[],
            &["a", "not_a"],
            &["a", "not_a"],
        );
        let err = StabilityLabeler::new(&theory).compute_labels().unwrap_err();
        assert_eq!("literal a has no possible status left", err.to_string());
    }

    #[test]
    fn test_rules_not_in_result() {
        let theory = police_theory();
        let result = StabilityLabeler::new(&theory).compute_stability().unwrap();
        assert!(["r1", "r2", "r3"]
            .iter()
            .all(|r| result.status_of(r).is_none()));
    }

    macro_rules! property_tests {
        ($($fixture:ident),*) => {
            paste! {
                $(
                    #[test]
                    fn [<test_determinism_ $fixture>]() {
                        let theory = [<$fixture _theory>]();
                        let labeler = StabilityLabeler::new(&theory);
                        assert_eq!(labeler.compute_labels().unwrap(), labeler.compute_labels().unwrap());
                    }

                    #[test]
                    fn [<test_idempotence_ $fixture>]() {
                        let theory = [<$fixture _theory>]();
                        let labeler = StabilityLabeler::new(&theory);
                        let labels = labeler.compute_labels().unwrap();
                        let mut narrowed = labels.clone();
                        let stats = labeler.narrow_labels(&mut narrowed).unwrap();
                        assert_eq!(0, stats.n_flag_flips());
                        assert_eq!(labels, narrowed);
                    }

                    #[test]
                    fn [<test_termination_bound_ $fixture>]() {
                        let theory = [<$fixture _theory>]();
                        let labeler = StabilityLabeler::new(&theory);
                        let mut labels = SatisfiabilityLabeler::new(&theory).compute_labels();
                        let n_seed_statuses = labels.n_possible_statuses();
                        let stats = labeler.narrow_labels(&mut labels).unwrap();
                        let n_elements = theory.language().len() + theory.argumentation_system().n_defeasible_rules();
                        assert!(stats.n_flag_flips() <= 4 * n_elements);
                        assert_eq!(n_seed_statuses - labels.n_possible_statuses(), stats.n_flag_flips());
                    }

                    #[test]
                    fn [<test_monotonicity_ $fixture>]() {
                        let theory = [<$fixture _theory>]();
                        let seed = SatisfiabilityLabeler::new(&theory).compute_labels();
                        let labels = StabilityLabeler::new(&theory).compute_labels().unwrap();
                        for l in theory.language().iter() {
                            for s in Status::iter() {
                                assert!(!labels.literal_label(l).can_be(s) || seed.literal_label(l).can_be(s));
                            }
                        }
                        for r in theory.argumentation_system().iter_defeasible_rules() {
                            for s in Status::iter() {
                                assert!(!labels.rule_label(&r).can_be(s) || seed.rule_label(&r).can_be(s));
                            }
                        }
                    }
                )*
            }
        };
    }

    property_tests!(police, conflict, out, isolated, empty_rule, chain, cycle);
}
