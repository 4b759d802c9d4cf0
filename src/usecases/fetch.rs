//! Fetch lifecycle state shared by all store slices.
//!
//! Every fetch domain moves through the same machine:
//! `NotStarted → Loading → {Success, Error}`; `Success` may go back to
//! `Loading` on refetch, carrying its data along. `Error` is terminal
//! until an explicit, user-initiated retry — nothing at this layer
//! retries automatically. Errors preserve the last-known-good data so
//! the UI keeps rendering stale rows instead of blanking out.

/// Status tag of a slice, detached from its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    NotStarted,
    Loading,
    Success,
    Error,
}

/// Tagged fetch result for one domain (one chain's rows, one metric, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No fetch has been attempted yet.
    NotStarted,
    /// A fetch is in flight; `prior` holds data from an earlier success.
    Loading { prior: Option<T> },
    /// The latest fetch succeeded.
    Success(T),
    /// The latest fetch failed; `last_good` preserves earlier data.
    Error { reason: String, last_good: Option<T> },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    /// Status tag of this state.
    pub fn status(&self) -> FetchStatus {
        match self {
            Self::NotStarted => FetchStatus::NotStarted,
            Self::Loading { .. } => FetchStatus::Loading,
            Self::Success(_) => FetchStatus::Success,
            Self::Error { .. } => FetchStatus::Error,
        }
    }

    /// Current or last-known-good data, regardless of status.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::NotStarted => None,
            Self::Loading { prior } => prior.as_ref(),
            Self::Success(data) => Some(data),
            Self::Error { last_good, .. } => last_good.as_ref(),
        }
    }

    /// The error reason, if in the error state.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Transition into `Loading`, carrying any existing data as `prior`.
    pub fn begin(&mut self) {
        let prior = std::mem::take(self).into_data();
        *self = Self::Loading { prior };
    }

    /// Commit a successful fetch.
    pub fn succeed(&mut self, data: T) {
        *self = Self::Success(data);
    }

    /// Record a failure, preserving whatever data we had.
    pub fn fail(&mut self, reason: impl Into<String>) {
        let last_good = std::mem::take(self).into_data();
        *self = Self::Error {
            reason: reason.into(),
            last_good,
        };
    }

    /// Consume the state, yielding its data if any.
    fn into_data(self) -> Option<T> {
        match self {
            Self::NotStarted => None,
            Self::Loading { prior } => prior,
            Self::Success(data) => Some(data),
            Self::Error { last_good, .. } => last_good,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_not_started_to_success() {
        let mut state: FetchState<u32> = FetchState::NotStarted;
        assert_eq!(state.status(), FetchStatus::NotStarted);
        state.begin();
        assert_eq!(state.status(), FetchStatus::Loading);
        assert_eq!(state.data(), None);
        state.succeed(7);
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.data(), Some(&7));
    }

    #[test]
    fn test_refetch_carries_prior_data() {
        let mut state = FetchState::Success(vec![1, 2, 3]);
        state.begin();
        assert_eq!(state.status(), FetchStatus::Loading);
        assert_eq!(state.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_error_preserves_last_known_good() {
        let mut state = FetchState::Success(42);
        state.begin();
        state.fail("boom");
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.data(), Some(&42));
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_error_without_prior_data() {
        let mut state: FetchState<u32> = FetchState::NotStarted;
        state.begin();
        state.fail("net down");
        assert_eq!(state.data(), None);
    }
}
