//! Values that may have come from a fallback

/// Result of a best-effort operation whose failure is swallowed
///
/// The fallback path stays visible to callers (and to logs) instead of
/// disappearing inside a caught error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovered<T> {
    /// The operation succeeded
    Resolved(T),
    /// The operation failed and `value` is the default used instead
    Fallback { value: T, reason: String },
}

impl<T> Recovered<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Resolved(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Resolved(value) | Self::Fallback { value, .. } => value,
        }
    }
}
