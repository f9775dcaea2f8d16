use super::StabilityResult;
use crate::utils::LabelType;
use anyhow::Result;

/// A trait for solvers able to compute the stable literals of an incomplete argumentation theory.
///
/// The theory under consideration is given when the solver is built.
pub trait StabilitySolver<T>
where
    T: LabelType,
{
    /// Computes the stable literals, grouped by their status.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustiat::stability::StabilitySolver;
    /// # use crustiat::utils::LabelType;
    /// fn count_stable<T: LabelType>(solver: &mut dyn StabilitySolver<T>) -> usize {
    ///     solver.compute_stability().map(|r| r.n_stable()).unwrap_or(0)
    /// }
    /// ```
    fn compute_stability(&mut self) -> Result<StabilityResult<T>>;
}
