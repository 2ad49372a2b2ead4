use thiserror::Error;

use super::machine::Guard;
use crate::capture::PermissionDenied;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Rejected: {0}")]
    Rejected(#[from] Guard),

    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),

    #[error("Session is closed")]
    Closed,
}
