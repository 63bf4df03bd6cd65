use client_core::RequestFailure;
use thiserror::Error;

use crate::sync_workflow::SyncStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("cannot start a synchronization while {from:?}")]
    InvalidStateTransition { from: SyncStatus },
    #[error("no synchronization session is open")]
    NoActiveSession,
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("form is not valid for submission")]
    NotValid,
    #[error("no roundtrip is loaded")]
    NotLoaded,
    #[error(transparent)]
    Request(#[from] RequestFailure),
}
