use std::fmt::Display;
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// The final status of a literal or a rule under the grounded semantics.
///
/// Statuses can be displayed and parsed from their lower-case names.
///
/// ```
/// # use crustiat::stability::Status;
/// # use std::str::FromStr;
/// assert_eq!(Status::Defended, Status::from_str("defended").unwrap());
/// assert_eq!("blocked", Status::Blocked.to_string());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumString, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    /// No argument can be built for the element.
    Unsatisfiable,
    /// An argument for the element is in the grounded extension.
    Defended,
    /// All the arguments for the element are attacked by the grounded extension.
    Out,
    /// Some arguments exist, but none is accepted nor rejected.
    Blocked,
}

/// The set of statuses a literal or a rule may still reach.
///
/// Each flag of a label tells if the corresponding [Status] remains possible.
/// Flags can only be removed through the public API: a label can only be narrowed.
/// A label is stable when exactly one status remains; it is contradictory when none remains,
/// which denotes an inconsistency in the computation or in the input theory.
///
/// ```
/// # use crustiat::stability::{StabilityLabel, Status};
/// let mut label = StabilityLabel::open();
/// assert_eq!(4, label.n_possible_statuses());
/// assert!(label.exclude(Status::Out));
/// assert!(!label.exclude(Status::Out));
/// label.exclude(Status::Blocked);
/// label.exclude(Status::Unsatisfiable);
/// assert_eq!(Some(Status::Defended), label.stable_status());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StabilityLabel {
    unsatisfiable: bool,
    defended: bool,
    out: bool,
    blocked: bool,
}

impl StabilityLabel {
    /// Builds a label from its four flags.
    pub fn new(unsatisfiable: bool, defended: bool, out: bool, blocked: bool) -> Self {
        StabilityLabel {
            unsatisfiable,
            defended,
            out,
            blocked,
        }
    }

    /// Builds a label where any status is possible.
    pub fn open() -> Self {
        Self::new(true, true, true, true)
    }

    /// Builds a label where the only possible status is [Status::Unsatisfiable].
    pub fn unsatisfiable_only() -> Self {
        Self::new(true, false, false, false)
    }

    /// Returns `true` iff the status is still possible.
    pub fn can_be(&self, status: Status) -> bool {
        match status {
            Status::Unsatisfiable => self.unsatisfiable,
            Status::Defended => self.defended,
            Status::Out => self.out,
            Status::Blocked => self.blocked,
        }
    }

    /// Removes a status from the possible ones.
    ///
    /// Returns `true` iff the status was possible before the call.
    pub fn exclude(&mut self, status: Status) -> bool {
        let flag = match status {
            Status::Unsatisfiable => &mut self.unsatisfiable,
            Status::Defended => &mut self.defended,
            Status::Out => &mut self.out,
            Status::Blocked => &mut self.blocked,
        };
        std::mem::replace(flag, false)
    }

    pub(crate) fn reopen(&mut self) {
        *self = Self::open();
    }

    /// Returns the number of statuses that are still possible.
    pub fn n_possible_statuses(&self) -> usize {
        [self.unsatisfiable, self.defended, self.out, self.blocked]
            .iter()
            .filter(|b| **b)
            .count()
    }

    /// Returns `true` iff exactly one status is possible.
    pub fn is_stable(&self) -> bool {
        self.n_possible_statuses() == 1
    }

    /// Returns the only possible status if the label is stable, or `None`.
    pub fn stable_status(&self) -> Option<Status> {
        if !self.is_stable() {
            return None;
        }
        [
            Status::Unsatisfiable,
            Status::Defended,
            Status::Out,
            Status::Blocked,
        ]
        .into_iter()
        .find(|s| self.can_be(*s))
    }

    /// Returns `true` iff no status is possible.
    pub fn is_contradictory(&self) -> bool {
        self.n_possible_statuses() == 0
    }
}

impl Display for StabilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |b: bool| if b { 'T' } else { 'F' };
        write!(
            f,
            "{{U:{} D:{} O:{} B:{}}}",
            flag(self.unsatisfiable),
            flag(self.defended),
            flag(self.out),
            flag(self.blocked)
        )
    }
}
