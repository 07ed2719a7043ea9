//! Registry error types

use thiserror::Error;

/// Errors returned by registration calls on a [`Troupe`](super::Troupe)
///
/// The registry is left unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TroupeError {
    /// A troupe was asked to register itself, which would recurse forever on dispatch
    #[error("Cannot register a troupe into itself.")]
    SelfRegistration,

    /// The bard passed to `unregister` is not currently registered
    #[error("Cannot unregister bard which is not registered: {0}")]
    NotRegistered(String),
}

pub type TroupeResult<T> = Result<T, TroupeError>;
