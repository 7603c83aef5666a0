//! engine::cancel
//!
//! Cooperative cancellation and deadlines.
//!
//! # Design
//!
//! A recovery request never blocks, so cancellation is a flag the search
//! polls between layers and once per iteration of its inner loops. A
//! [`CancelToken`] can be cloned and triggered from another thread; an
//! [`Interrupt`] bundles a token with an optional deadline and is what the
//! search actually checks.
//!
//! # Example
//!
//! ```
//! use clocklattice::engine::{CancelToken, Interrupt};
//! use std::time::Duration;
//!
//! let token = CancelToken::new();
//! let interrupt = Interrupt::new(token.clone()).with_timeout(Duration::from_secs(60));
//! assert!(!interrupt.triggered());
//! token.cancel();
//! assert!(interrupt.triggered());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A shareable cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// True once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Cancellation token plus optional deadline.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    token: CancelToken,
    deadline: Option<Instant>,
}

impl Interrupt {
    /// Never fires.
    pub fn none() -> Self {
        Self::default()
    }

    /// Fires when `token` is cancelled.
    pub fn new(token: CancelToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Also fire once `timeout` has elapsed from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Also fire at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// True if the token was cancelled or the deadline has passed.
    pub fn triggered(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_never_fires() {
        assert!(!Interrupt::none().triggered());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn past_deadline_fires() {
        let interrupt = Interrupt::none().with_deadline(Instant::now());
        assert!(interrupt.triggered());
    }

    #[test]
    fn cancel_from_another_thread() {
        let token = CancelToken::new();
        let interrupt = Interrupt::new(token.clone());
        std::thread::spawn(move || token.cancel()).join().unwrap();
        assert!(interrupt.triggered());
    }
}
