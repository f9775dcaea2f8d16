//! A module containing the material needed to handle incomplete argumentation theories.

mod argumentation_system;
pub use argumentation_system::ArgumentationSystem;
pub use argumentation_system::DefeasibleRule;
pub use argumentation_system::StrictRule;

mod incomplete_argumentation_theory;
pub use incomplete_argumentation_theory::IncompleteArgumentationTheory;

mod language;
pub use language::Language;
pub use language::Literal;
