use super::Status;
use crate::utils::LabelType;
use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// The stable literals of a theory, grouped by their status.
///
/// Results are produced by the [StabilitySolver](super::StabilitySolver) implementations.
/// Literals that are not stable are not part of the result.
///
/// # Example
///
/// ```
/// # use crustiat::stability::{StabilityResult, Status};
/// let mut approximation = StabilityResult::default();
/// approximation.insert("similar_url", Status::Defended);
/// let mut exact = StabilityResult::default();
/// exact.insert("similar_url", Status::Defended);
/// exact.add_to_result("not_similar_url", "unsatisfiable").unwrap();
/// assert!(approximation.is_subset_of(&exact));
/// assert_eq!(2, exact.n_stable());
/// ```
#[derive(Clone, Debug)]
pub struct StabilityResult<T>
where
    T: LabelType,
{
    unsatisfiable: HashSet<T>,
    defended: HashSet<T>,
    out: HashSet<T>,
    blocked: HashSet<T>,
}

impl<T> Default for StabilityResult<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self {
            unsatisfiable: HashSet::new(),
            defended: HashSet::new(),
            out: HashSet::new(),
            blocked: HashSet::new(),
        }
    }
}

impl<T> StabilityResult<T>
where
    T: LabelType,
{
    fn set(&self, status: Status) -> &HashSet<T> {
        match status {
            Status::Unsatisfiable => &self.unsatisfiable,
            Status::Defended => &self.defended,
            Status::Out => &self.out,
            Status::Blocked => &self.blocked,
        }
    }

    fn set_mut(&mut self, status: Status) -> &mut HashSet<T> {
        match status {
            Status::Unsatisfiable => &mut self.unsatisfiable,
            Status::Defended => &mut self.defended,
            Status::Out => &mut self.out,
            Status::Blocked => &mut self.blocked,
        }
    }

    /// Records a literal as stable with the given status.
    pub fn insert(&mut self, literal: T, status: Status) {
        self.set_mut(status).insert(literal);
    }

    /// Records a literal as stable with the status given by its name.
    ///
    /// An error is returned if the name does not match a [Status].
    pub fn add_to_result(&mut self, literal: T, status: &str) -> Result<()> {
        let status =
            Status::from_str(status).map_err(|_| anyhow!("unrecognized status: {}", status))?;
        self.insert(literal, status);
        Ok(())
    }

    /// Returns the literals recorded with the given status.
    pub fn literals_with_status(&self, status: Status) -> &HashSet<T> {
        self.set(status)
    }

    /// Returns the status of a literal, or `None` if it is not recorded.
    pub fn status_of(&self, literal: &T) -> Option<Status> {
        Status::iter().find(|s| self.set(*s).contains(literal))
    }

    /// Returns the number of stable literals, all statuses combined.
    pub fn n_stable(&self) -> usize {
        Status::iter().map(|s| self.set(s).len()).sum()
    }

    /// Returns `true` iff each literal recorded in this result is recorded with the same status in the other one.
    pub fn is_subset_of(&self, other: &StabilityResult<T>) -> bool {
        Status::iter().all(|s| self.set(s).is_subset(other.set(s)))
    }
}

impl<T> PartialEq for StabilityResult<T>
where
    T: LabelType,
{
    fn eq(&self, other: &Self) -> bool {
        Status::iter().all(|s| self.set(s) == other.set(s))
    }
}

impl<T> Eq for StabilityResult<T> where T: LabelType {}

impl<T> Display for StabilityResult<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, status) in Status::iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let mut labels = self
                .set(status)
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>();
            labels.sort_unstable();
            write!(f, "{}:", status)?;
            for l in labels {
                write!(f, " {}", l)?;
            }
        }
        Ok(())
    }
}
