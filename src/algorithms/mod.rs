//! Low-level building blocks for the Hermitian eigensolver.
//!
//! ** NOTE: We recommend using the high-level entry points in [`crate::solvers`] instead.
//! This module is intended for callers that solve many eigenproblems of the same order
//! and want to control every allocation.
//!
//! Each buffer the solver touches is a separately owned resource: the scratch
//! [`EvdWorkspace`], the [`Eigenvalues`] vector, and the [`Eigenvectors`] matrix. All of
//! them share the same lifecycle:
//!
//! ```text
//! [fresh] --new(n)--> [ready] --solve--> [ready]   (repeatable)
//!                        \--release--> [released] (terminal)
//! ```
//!
//! Storage is freed when `release` is called or when the value is dropped, whichever
//! happens first, and never twice. Using a released resource is a state error.

pub mod evd;

pub use evd::{Eigenvalues, Eigenvectors, EvdWorkspace, solve};

use crate::error::{CMatrixError, ErrorRepr};

/// A single-owner slot around a resource that can be released early.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    resource: &'static str,
    value: Option<T>,
}

impl<T> Slot<T> {
    pub(crate) fn new(resource: &'static str, value: T) -> Self {
        Self {
            resource,
            value: Some(value),
        }
    }

    pub(crate) fn get(&self) -> Result<&T, CMatrixError> {
        self.value.as_ref().ok_or_else(|| self.released())
    }

    pub(crate) fn get_mut(&mut self) -> Result<&mut T, CMatrixError> {
        let resource = self.resource;
        self.value
            .as_mut()
            .ok_or_else(|| ErrorRepr::Released { resource }.into())
    }

    /// Drops the resource. Returns `false` if it was already released.
    pub(crate) fn release(&mut self) -> bool {
        match self.value.take() {
            Some(value) => {
                drop(value);
                log::debug!("Released {}.", self.resource);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_released(&self) -> bool {
        self.value.is_none()
    }

    fn released(&self) -> CMatrixError {
        ErrorRepr::Released {
            resource: self.resource,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_slot_releases_exactly_once() {
        let mut slot = Slot::new("test buffer", vec![1u8, 2, 3]);
        assert!(!slot.is_released());
        assert_eq!(slot.get().unwrap().len(), 3);
        assert!(slot.release());
        assert!(slot.is_released());
        assert!(!slot.release());
    }

    #[test]
    fn test_released_slot_reports_state_error() {
        let mut slot = Slot::new("test buffer", 0u32);
        slot.release();
        assert_eq!(slot.get().unwrap_err().kind(), ErrorKind::State);
        let err = slot.get_mut().unwrap_err();
        assert_eq!(
            err.to_string(),
            "State error: the test buffer has already been released."
        );
    }
}
