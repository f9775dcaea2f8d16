use super::{StabilityLabel, StabilityResult};
use crate::iat::{DefeasibleRule, Language, Literal};
use crate::utils::LabelType;

/// The stability labels of all the literals and defeasible rules of a theory.
///
/// Labels are indexed by the ids of the literals and the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabilityLabels {
    literal_labels: Vec<StabilityLabel>,
    rule_labels: Vec<StabilityLabel>,
}

impl StabilityLabels {
    /// Builds a new set of labels, one per literal and per rule, all of them set to the provided one.
    pub fn new(n_literals: usize, n_rules: usize, label: StabilityLabel) -> Self {
        StabilityLabels {
            literal_labels: vec![label; n_literals],
            rule_labels: vec![label; n_rules],
        }
    }

    /// Returns the label of a literal.
    pub fn literal_label<T>(&self, literal: &Literal<T>) -> &StabilityLabel
    where
        T: LabelType,
    {
        &self.literal_labels[literal.id()]
    }

    /// Returns the label of a defeasible rule.
    pub fn rule_label<T>(&self, rule: &DefeasibleRule<T>) -> &StabilityLabel
    where
        T: LabelType,
    {
        &self.rule_labels[rule.id()]
    }

    pub(crate) fn literal_label_by_id(&self, id: usize) -> &StabilityLabel {
        &self.literal_labels[id]
    }

    pub(crate) fn literal_label_by_id_mut(&mut self, id: usize) -> &mut StabilityLabel {
        &mut self.literal_labels[id]
    }

    pub(crate) fn rule_label_by_id(&self, id: usize) -> &StabilityLabel {
        &self.rule_labels[id]
    }

    pub(crate) fn rule_label_by_id_mut(&mut self, id: usize) -> &mut StabilityLabel {
        &mut self.rule_labels[id]
    }

    /// Returns the number of literal labels.
    pub fn n_literals(&self) -> usize {
        self.literal_labels.len()
    }

    /// Returns the number of rule labels.
    pub fn n_rules(&self) -> usize {
        self.rule_labels.len()
    }

    /// Returns the sum of the possible statuses of all the labels.
    pub fn n_possible_statuses(&self) -> usize {
        self.literal_labels
            .iter()
            .chain(self.rule_labels.iter())
            .map(|l| l.n_possible_statuses())
            .sum()
    }

    /// Builds the result made of the literals having a stable label.
    ///
    /// The language must be the one the labels were computed for.
    pub fn to_stability_result<T>(&self, language: &Language<T>) -> StabilityResult<T>
    where
        T: LabelType,
    {
        let mut result = StabilityResult::default();
        language.iter().for_each(|l| {
            if let Some(status) = self.literal_label(l).stable_status() {
                result.insert(l.label().clone(), status);
            }
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stability::Status;

    #[test]
    fn test_new() {
        let labels = StabilityLabels::new(3, 2, StabilityLabel::unsatisfiable_only());
        assert_eq!(3, labels.n_literals());
        assert_eq!(2, labels.n_rules());
        assert_eq!(5, labels.n_possible_statuses());
    }

    #[test]
    fn test_to_stability_result() {
        let language = Language::new_with_labels(&["a", "b", "c"]);
        let mut labels = StabilityLabels::new(3, 0, StabilityLabel::open());
        let a = labels.literal_label_by_id_mut(0);
        a.exclude(Status::Unsatisfiable);
        a.exclude(Status::Out);
        a.exclude(Status::Blocked);
        *labels.literal_label_by_id_mut(1) = StabilityLabel::unsatisfiable_only();
        let result = labels.to_stability_result(&language);
        assert_eq!(2, result.n_stable());
        assert_eq!(Some(Status::Defended), result.status_of(&"a"));
        assert_eq!(Some(Status::Unsatisfiable), result.status_of(&"b"));
        assert_eq!(None, result.status_of(&"c"));
    }
}
