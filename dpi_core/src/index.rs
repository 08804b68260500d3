//! Step index arithmetic.
//!
//! Candidate indices are signed (`i64`) so that `active - delta` can go
//! negative before the boundary policy brings it back into the table.

/// Behavior when a candidate index falls outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Saturate to the nearest end of the table.
    #[default]
    Clamp,
    /// Treat the table as circular.
    Wrap,
}

impl Boundary {
    #[inline]
    pub fn from_wrap(wrap: bool) -> Self {
        if wrap { Boundary::Wrap } else { Boundary::Clamp }
    }

    /// Map `index` into `[0, len)` using this policy.
    #[inline]
    pub fn apply(self, index: i64, len: usize) -> usize {
        match self {
            Boundary::Clamp => clamp_index(index, len),
            Boundary::Wrap => wrap_index(index, len),
        }
    }
}

/// `max(0, min(index, len - 1))`. Returns 0 when `len == 0`.
#[inline]
pub fn clamp_index(index: i64, len: usize) -> usize {
    let max = i64::try_from(len.saturating_sub(1)).unwrap_or(i64::MAX);
    index.clamp(0, max) as usize
}

/// Mathematical modulo of `index` by `len` (never negative). Returns 0 when `len == 0`.
#[inline]
pub fn wrap_index(index: i64, len: usize) -> usize {
    let Ok(len) = i64::try_from(len) else {
        return clamp_index(index, len);
    };
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len) as usize
}
