use crate::iat::ArgumentationSystem;
use crate::utils::LabelType;

/// The dependencies between the literals and the defeasible rules of an argumentation system.
///
/// The parents of a literal are the rules using it as an antecedent,
/// while its children are the rules having it as their consequent.
/// Each literal of the language has an entry, possibly empty.
///
/// The graph also records, for each literal, the literals it is a contrary of.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
    attacked: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the dependency graph of an argumentation system.
    pub fn new<T>(system: &ArgumentationSystem<T>) -> Self
    where
        T: LabelType,
    {
        let n_literals = system.language().len();
        let mut parents = vec![vec![]; n_literals];
        let mut children = vec![vec![]; n_literals];
        system.iter_defeasible_rules().for_each(|r| {
            children[r.consequent_id()].push(r.id());
            r.antecedent_ids()
                .iter()
                .for_each(|a| parents[*a].push(r.id()));
        });
        let mut attacked = vec![vec![]; n_literals];
        (0..n_literals).for_each(|l| {
            system
                .contrary_ids(l)
                .iter()
                .for_each(|c| attacked[*c].push(l))
        });
        DependencyGraph {
            parents,
            children,
            attacked,
        }
    }

    /// Returns the ids of the rules using the literal as an antecedent.
    pub fn parent_ids(&self, literal_id: usize) -> &[usize] {
        &self.parents[literal_id]
    }

    /// Returns the ids of the rules concluding the literal.
    pub fn children_ids(&self, literal_id: usize) -> &[usize] {
        &self.children[literal_id]
    }

    /// Returns the ids of the literals having this one as a contrary.
    pub fn attacked_ids(&self, literal_id: usize) -> &[usize] {
        &self.attacked[literal_id]
    }

    /// Returns `true` iff no rule concludes the literal.
    pub fn is_leaf(&self, literal_id: usize) -> bool {
        self.children[literal_id].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iat::Language;

    #[test]
    fn test_graph() {
        let language = Language::new_with_labels(&["a", "b", "c", "d"]);
        let mut system = ArgumentationSystem::new_with_language(language);
        system.new_defeasible_rule(&"r0", &"c", &[&"a", &"b"]).unwrap();
        system.new_defeasible_rule(&"r1", &"c", &[&"a"]).unwrap();
        system.new_defeasible_rule(&"r2", &"a", &[]).unwrap();
        let graph = DependencyGraph::new(&system);
        assert_eq!(&[0, 1], graph.parent_ids(0));
        assert_eq!(&[0], graph.parent_ids(1));
        assert!(graph.parent_ids(2).is_empty());
        assert!(graph.parent_ids(3).is_empty());
        assert_eq!(&[2], graph.children_ids(0));
        assert!(graph.is_leaf(1));
        assert_eq!(&[0, 1], graph.children_ids(2));
        assert!(graph.is_leaf(3));
    }

    #[test]
    fn test_attacked() {
        let language = Language::new_with_labels(&["a", "not_a", "b"]);
        let mut system = ArgumentationSystem::new_with_language(language);
        system.new_contradictory(&"a", &"not_a").unwrap();
        system.new_contrary(&"b", &"a").unwrap();
        let graph = DependencyGraph::new(&system);
        assert_eq!(&[1, 2], graph.attacked_ids(0));
        assert_eq!(&[0], graph.attacked_ids(1));
        assert!(graph.attacked_ids(2).is_empty());
    }
}
