//! Algorithms computing the stability of the literals of incomplete argumentation theories.
//!
//! The [StabilityLabeler] gives an approximation computed in polynomial time,
//! while the [ExternalStabilitySolver] relies on an external answer set solver to get the exact result.

mod dependency_graph;
pub use dependency_graph::DependencyGraph;

mod external_stability_solver;
pub use external_stability_solver::ExternalStabilitySolver;

mod satisfiability_labeler;
pub use satisfiability_labeler::SatisfiabilityLabeler;

mod specs;
pub use specs::StabilitySolver;

mod stability_label;
pub use stability_label::StabilityLabel;
pub use stability_label::Status;

mod stability_labeler;
pub use stability_labeler::NarrowingStats;
pub use stability_labeler::StabilityLabeler;

mod stability_labels;
pub use stability_labels::StabilityLabels;

mod stability_result;
pub use stability_result::StabilityResult;
