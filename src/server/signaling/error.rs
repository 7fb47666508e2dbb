use std::fmt;
use uuid::Uuid;

/// Errors produced by the signaling core.
///
/// Every variant is recoverable per-request: it is reported to the offending
/// client or logged, never allowed to crash the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// A registration was attempted for an id that is already connected.
    DuplicateId(Uuid),
    /// The destination client is not (or no longer) connected.
    UnknownClient(Uuid),
    /// A pairing was attempted for a client that already has a partner.
    AlreadyPaired(Uuid),
    /// A relay was attempted without an active pairing.
    NotPaired,
    /// An explicit relay target does not match the sender's actual partner.
    Unauthorized { claimed: Uuid },
}

impl SignalError {
    /// Stable wire code, used in `Error` frames sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            SignalError::DuplicateId(_) => "DUPLICATE_ID",
            SignalError::UnknownClient(_) => "UNKNOWN_CLIENT",
            SignalError::AlreadyPaired(_) => "ALREADY_PAIRED",
            SignalError::NotPaired => "NOT_PAIRED",
            SignalError::Unauthorized { .. } => "UNAUTHORIZED",
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::DuplicateId(id) => write!(f, "client {} is already registered", id),
            SignalError::UnknownClient(id) => write!(f, "client {} is not connected", id),
            SignalError::AlreadyPaired(id) => write!(f, "client {} already has a partner", id),
            SignalError::NotPaired => write!(f, "no active partner"),
            SignalError::Unauthorized { claimed } => {
                write!(f, "target {} is not the sender's partner", claimed)
            }
        }
    }
}

impl std::error::Error for SignalError {}
