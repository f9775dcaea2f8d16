/// An enum acting like a `Result`, but producing warnings instead of errors.
///
/// As there are no error values, there is always an "ok" value, which can be associated with one or more warnings.
pub(crate) enum WarningResult<T, W> {
    Ok(T),
    Warned(T, Vec<W>),
}

impl<T, W> WarningResult<T, W> {
    /// Consumes the warning, returning the corresponding `Ok` value.
    ///
    /// The warnings are passed to the provided callback.
    pub fn consume_warnings<F>(self, f: F) -> T
    where
        F: FnOnce(Vec<W>),
    {
        match self {
            WarningResult::Ok(t) => t,
            WarningResult::Warned(t, w) => {
                f(w);
                t
            }
        }
    }

    /// Applies a function to the value, keeping the warnings untouched.
    pub fn map<U, F>(self, f: F) -> WarningResult<U, W>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            WarningResult::Ok(t) => WarningResult::Ok(f(t)),
            WarningResult::Warned(t, w) => WarningResult::Warned(f(t), w),
        }
    }
}

/// Collects the values into a vector.
///
/// The list of warnings is the concatenation of the lists of warnings, in the order of the iterator.
/// If this list is empty, an `Ok` value is returned.
impl<T, W> FromIterator<WarningResult<T, W>> for WarningResult<Vec<T>, W> {
    fn from_iter<I: IntoIterator<Item = WarningResult<T, W>>>(iter: I) -> Self {
        let mut values = vec![];
        let mut warnings = vec![];
        for r in iter {
            match r {
                WarningResult::Ok(t) => values.push(t),
                WarningResult::Warned(t, mut w) => {
                    values.push(t);
                    warnings.append(&mut w);
                }
            }
        }
        if warnings.is_empty() {
            WarningResult::Ok(values)
        } else {
            WarningResult::Warned(values, warnings)
        }
    }
}
