//! Mass refinement sequence.
//!
//! Driven by [`MassRefresh::tick`] from the host's frame loop. A refresh waits
//! for the shape to settle, then runs a fixed number of convergence passes
//! separated by a short delay so the host can apply the previous pass before
//! the next sample, and finishes with one authoritative pass.

use crate::constants::{REFRESH_PASSES, REFRESH_PASS_DELAY};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshStatus {
    Idle,
    Pending,
    Running,
    Done,
}

/// Work the caller must perform for the current tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshStep {
    /// Re-estimate mass and update main physics.
    Converge { pass: usize },
    /// Re-estimate mass with diagnostics and update everything.
    Finalize,
}

#[derive(Clone, Debug)]
pub struct MassRefresh {
    status: RefreshStatus,
    passes: usize,
    pass_delay: Duration,
    next_pass: usize,
    delay_left: Duration,
}

impl Default for MassRefresh {
    fn default() -> Self {
        Self::new(REFRESH_PASSES, REFRESH_PASS_DELAY)
    }
}

impl MassRefresh {
    pub fn new(passes: usize, pass_delay: Duration) -> Self {
        Self {
            status: RefreshStatus::Idle,
            passes,
            pass_delay,
            next_pass: 0,
            delay_left: Duration::ZERO,
        }
    }

    #[inline]
    pub fn status(&self) -> RefreshStatus {
        self.status
    }

    #[inline]
    pub fn in_progress(&self) -> bool {
        matches!(self.status, RefreshStatus::Pending | RefreshStatus::Running)
    }

    /// Begin a refresh. Returns false (and drops the trigger) if one is
    /// already in flight.
    pub fn start(&mut self) -> bool {
        if self.in_progress() {
            log::debug!("[refresh] already in progress, trigger dropped");
            return false;
        }
        self.status = RefreshStatus::Pending;
        self.next_pass = 0;
        self.delay_left = Duration::ZERO;
        true
    }

    pub fn cancel(&mut self) {
        if self.in_progress() {
            log::debug!("[refresh] cancelled at pass {}", self.next_pass);
        }
        self.status = RefreshStatus::Idle;
        self.next_pass = 0;
        self.delay_left = Duration::ZERO;
    }

    /// Advance by one frame. `shape_changing` reports whether the shape
    /// signal changed this frame; a pending refresh keeps waiting while it does.
    pub fn tick(&mut self, dt: Duration, shape_changing: bool) -> Option<RefreshStep> {
        match self.status {
            RefreshStatus::Idle | RefreshStatus::Done => None,
            RefreshStatus::Pending => {
                if !shape_changing {
                    self.status = RefreshStatus::Running;
                }
                None
            }
            RefreshStatus::Running => {
                if !self.delay_left.is_zero() {
                    self.delay_left = self.delay_left.saturating_sub(dt);
                    if !self.delay_left.is_zero() {
                        return None;
                    }
                }
                if self.next_pass < self.passes {
                    let pass = self.next_pass;
                    self.next_pass += 1;
                    // no delay after the first pass, only between later ones
                    if pass > 0 {
                        self.delay_left = self.pass_delay;
                    }
                    return Some(RefreshStep::Converge { pass });
                }
                self.status = RefreshStatus::Done;
                Some(RefreshStep::Finalize)
            }
        }
    }
}
