use super::{StabilityLabel, StabilityLabels, Status};
use crate::iat::IncompleteArgumentationTheory;
use crate::utils::LabelType;

/// Computes the initial labels used by the [StabilityLabeler](super::StabilityLabeler).
///
/// The queryable literals with no observed contrary are left open, while other literals and all the rules are
/// considered unsatisfiable. Then, rules that may apply are reopened together with their consequent,
/// until a fixpoint is reached.
///
/// # Example
///
/// ```
/// # use crustiat::iat::{ArgumentationSystem, IncompleteArgumentationTheory, Language};
/// # use crustiat::stability::SatisfiabilityLabeler;
/// let language = Language::new_with_labels(&["a", "b"]);
/// let mut system = ArgumentationSystem::new_with_language(language);
/// system.new_defeasible_rule(&"r1", &"b", &[&"a"]).unwrap();
/// let mut theory = IncompleteArgumentationTheory::new(system);
/// theory.set_queryable(&"a").unwrap();
/// let labels = SatisfiabilityLabeler::new(&theory).compute_labels();
/// let b = theory.language().get_literal(&"b").unwrap();
/// assert!(!labels.literal_label(b).is_stable());
/// ```
pub struct SatisfiabilityLabeler<'a, T>
where
    T: LabelType,
{
    theory: &'a IncompleteArgumentationTheory<T>,
}

impl<'a, T> SatisfiabilityLabeler<'a, T>
where
    T: LabelType,
{
    /// Builds a new labeler for the given theory.
    pub fn new(theory: &'a IncompleteArgumentationTheory<T>) -> Self {
        SatisfiabilityLabeler { theory }
    }

    /// Computes the initial labels.
    pub fn compute_labels(&self) -> StabilityLabels {
        let system = self.theory.argumentation_system();
        let mut labels = StabilityLabels::new(
            system.language().len(),
            system.n_defeasible_rules(),
            StabilityLabel::unsatisfiable_only(),
        );
        for literal in system.language().iter() {
            if self.theory.is_queryable(literal)
                && !system
                    .contrary_ids(literal.id())
                    .iter()
                    .any(|c| self.theory.is_in_knowledge_base_id(*c))
            {
                labels.literal_label_by_id_mut(literal.id()).reopen();
            }
        }
        let mut n_passes = 0;
        loop {
            n_passes += 1;
            let mut reopened = false;
            for rule in system.iter_defeasible_rules() {
                if labels.rule_label_by_id(rule.id()).can_be(Status::Defended) {
                    continue;
                }
                if rule
                    .antecedent_ids()
                    .iter()
                    .all(|a| labels.literal_label_by_id(*a).can_be(Status::Defended))
                {
                    labels.rule_label_by_id_mut(rule.id()).reopen();
                    labels
                        .literal_label_by_id_mut(rule.consequent_id())
                        .reopen();
                    reopened = true;
                }
            }
            if !reopened {
                break;
            }
        }
        log::debug!(
            "seed labels computed in {} saturation passes ({} possible statuses)",
            n_passes,
            labels.n_possible_statuses()
        );
        labels
    }
}
