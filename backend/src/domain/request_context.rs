//! Cancellable execution context handed to every service and storage call.
//!
//! Cancellation is cooperative: the service layer checks the context before
//! it delegates to storage. Storage operations are not interrupted once they
//! have started.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context stopped accepting new work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    /// The context's token was cancelled explicitly.
    Cancelled,
    /// The context's deadline passed.
    DeadlineExceeded,
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("request cancelled"),
            Self::DeadlineExceeded => f.write_str("request deadline exceeded"),
        }
    }
}

/// Execution context for a single logical request.
///
/// # Examples
/// ```
/// use userbase::domain::RequestContext;
///
/// let ctx = RequestContext::background();
/// assert!(!ctx.is_cancelled());
/// ctx.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

impl RequestContext {
    /// A context with no deadline that is only cancelled explicitly.
    #[must_use]
    pub fn background() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Wrap an existing cancellation token.
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Expire the context `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Expire the context at `deadline`, keeping an earlier one if present.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Derive a context that is cancelled with this one but can also be
    /// cancelled on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel the context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Configured deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Reason the context stopped accepting work, if it has.
    #[must_use]
    pub fn cancellation(&self) -> Option<CancellationReason> {
        if self.token.is_cancelled() {
            return Some(CancellationReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Some(CancellationReason::DeadlineExceeded)
            }
            _ => None,
        }
    }

    /// Whether the context has been cancelled or has expired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn background_context_is_active() {
        let ctx = RequestContext::background();
        assert!(ctx.cancellation().is_none());
        assert!(ctx.deadline().is_none());
    }

    #[rstest]
    fn explicit_cancel_is_reported() {
        let ctx = RequestContext::background();
        ctx.cancel();
        assert_eq!(ctx.cancellation(), Some(CancellationReason::Cancelled));
    }

    #[rstest]
    fn cancelling_parent_cancels_child() {
        let parent = RequestContext::background();
        let child = parent.child();
        parent.cancel();
        assert!(child.is_cancelled());
    }

    #[rstest]
    fn cancelling_child_leaves_parent_active() {
        let parent = RequestContext::background();
        let child = parent.child();
        child.cancel();
        assert!(!parent.is_cancelled());
    }

    #[rstest]
    fn elapsed_deadline_is_reported() {
        let ctx = RequestContext::background().with_timeout(Duration::ZERO);
        assert_eq!(ctx.cancellation(), Some(CancellationReason::DeadlineExceeded));
    }

    #[rstest]
    fn future_deadline_keeps_context_active() {
        let ctx = RequestContext::background().with_timeout(Duration::from_secs(3600));
        assert!(!ctx.is_cancelled());
    }

    #[rstest]
    fn earlier_deadline_wins() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(60);
        let ctx = RequestContext::background()
            .with_deadline(early)
            .with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }
}
