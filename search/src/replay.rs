//! Random-access replay over a finished trace.
//!
//! A [`ReplayCursor`] borrows a [`TraceV1`] and owns a [`RunContext`]. Every
//! move restores the context from the target step's snapshot, so the context
//! always equals what the engine saw when that step was recorded. The trace
//! itself is never mutated and the search is never re-run.

use stepwise_kernel::carrier::context::RunContext;

use crate::trace::{StepV1, TraceV1};

/// Replay failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// Strict jump to an index past the end of the trace.
    #[error("step index {index} out of range for trace of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Cursor over a trace, clamped to `[0, len - 1]`.
#[derive(Debug, Clone)]
pub struct ReplayCursor<'t> {
    trace: &'t TraceV1,
    index: usize,
    context: RunContext,
}

impl<'t> ReplayCursor<'t> {
    /// Cursor positioned at step 0 with the context restored from it.
    #[must_use]
    pub fn new(trace: &'t TraceV1) -> Self {
        let mut cursor = Self {
            trace,
            index: 0,
            context: RunContext::new(trace.metadata().node_count),
        };
        cursor.restore();
        cursor
    }

    /// The step under the cursor.
    #[must_use]
    pub fn current(&self) -> &'t StepV1 {
        &self.trace.steps()[self.index]
    }

    /// Move one step forward. At the last step this is a no-op.
    pub fn advance(&mut self) -> &'t StepV1 {
        if self.index + 1 < self.trace.len() {
            self.move_to(self.index + 1);
        }
        self.current()
    }

    /// Move one step back. At step 0 this is a no-op.
    pub fn retreat(&mut self) -> &'t StepV1 {
        if self.index > 0 {
            self.move_to(self.index - 1);
        }
        self.current()
    }

    /// Jump to `index`, clamped to the last step.
    pub fn seek(&mut self, index: usize) -> &'t StepV1 {
        let target = index.min(self.trace.len().saturating_sub(1));
        if target != self.index {
            self.move_to(target);
        }
        self.current()
    }

    /// Jump to exactly `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::IndexOutOfRange`] if `index >= len()`; the
    /// cursor does not move.
    pub fn jump_to(&mut self, index: usize) -> Result<&'t StepV1, ReplayError> {
        if index >= self.trace.len() {
            return Err(ReplayError::IndexOutOfRange {
                index,
                len: self.trace.len(),
            });
        }
        Ok(self.seek(index))
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.trace.len()
    }

    /// Run state as of the current step.
    #[must_use]
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    #[must_use]
    pub fn trace(&self) -> &'t TraceV1 {
        self.trace
    }

    fn move_to(&mut self, index: usize) {
        tracing::trace!(from = self.index, to = index, "replay move");
        self.index = index;
        self.restore();
    }

    fn restore(&mut self) {
        if let Some(step) = self.trace.step(self.index) {
            self.context.restore(&step.snapshot);
        }
    }
}
