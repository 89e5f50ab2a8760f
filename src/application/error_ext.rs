//! Attaching the grid source or menu target to I/O failures

use std::fmt::Display;
use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Lifts `io::Result` into `ApplicationResult`, naming what was being read or written.
///
/// The target is anything printable: a file path (`path.display()`) or a
/// pseudo source such as `<stdin>`. The `io::Error` is kept as the source so
/// a missing input can still be told apart from other failures.
pub trait IoResultExt<T> {
    fn with_source_context(self, action: &str, target: impl Display) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_source_context(self, action: &str, target: impl Display) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{} {}", action, target),
            source: Box::new(e),
        })
    }
}
