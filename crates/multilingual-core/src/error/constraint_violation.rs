use super::Error;

/// Error when the store rejects a write because of a uniqueness or not-null
/// constraint.
#[derive(Debug)]
pub(super) struct ConstraintViolationError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConstraintViolationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConstraintViolationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "constraint violation: {}", self.inner)
    }
}

impl Error {
    /// Creates a constraint violation error from the driver's error.
    pub fn constraint_violation(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ConstraintViolation(
            ConstraintViolationError {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ConstraintViolation(_)))
    }
}
