use crate::error::WorkflowError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Disables a mutation while a previous one of the same kind is in flight.
///
/// Screens hold one guard per control; `try_begin` hands out a token that
/// re-enables the control when dropped.
#[derive(Debug, Clone)]
pub struct MutationGuard {
    name: &'static str,
    in_flight: Arc<AtomicBool>,
}

#[must_use = "the guard is released as soon as the token is dropped"]
#[derive(Debug)]
pub struct InFlight {
    in_flight: Arc<AtomicBool>,
}

impl MutationGuard {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> Result<InFlight, WorkflowError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| WorkflowError::Busy(self.name))?;
        Ok(InFlight {
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected() {
        let guard = MutationGuard::new("reorder");
        let token = guard.try_begin().unwrap();
        assert!(guard.is_pending());
        assert!(matches!(guard.try_begin(), Err(WorkflowError::Busy("reorder"))));
        drop(token);
        assert!(!guard.is_pending());
        assert!(guard.try_begin().is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let guard = MutationGuard::new("save");
        let other = guard.clone();
        let _token = guard.try_begin().unwrap();
        assert!(other.is_pending());
    }
}
