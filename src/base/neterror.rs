use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Generic Errors
    #[error("Operation aborted")]
    Aborted,
    #[error("Invalid argument")]
    InvalidArgument,

    // Name Resolution Errors
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Name not resolved for {domain}: {reason}")]
    NameNotResolvedFor { domain: String, reason: String },
    #[error("Name resolution failed")]
    NameResolutionFailed,
    #[error("Name resolution failed for {domain}: {reason}")]
    NameResolutionFailedFor { domain: String, reason: String },

    // Engine Errors
    #[error("Unknown service: {service}")]
    UnknownService { service: String },
    #[error("Resolution engine stopped")]
    EngineStopped,
    #[error("Failed to start resolver worker: {reason}")]
    WorkerStartFailed { reason: String },

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    /// Builds a not-found error for `domain` from an IO error.
    pub fn dns_failed(domain: &str, err: std::io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            reason: err.to_string(),
        }
    }

    /// True when the resolver definitively reported that the host does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NetError::NameNotResolved | NetError::NameNotResolvedFor { .. }
        )
    }

    /// True when the lookup was aborted rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, NetError::Aborted)
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::Aborted => -3,
            NetError::InvalidArgument => -4,
            NetError::NameNotResolved => -105,
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::NameResolutionFailed => -137,
            NetError::NameResolutionFailedFor { .. } => -137,
            // Engine errors (custom codes starting at -10000)
            NetError::UnknownService { .. } => -10000,
            NetError::EngineStopped => -10001,
            NetError::WorkerStartFailed { .. } => -10002,
            NetError::Unknown(code) => *code,
        }
    }
}

/// Detail fields do not survive the trip through a code; variants that
/// carry them come back with empty strings.
impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -3 => NetError::Aborted,
            -4 => NetError::InvalidArgument,
            -105 => NetError::NameNotResolved,
            -137 => NetError::NameResolutionFailed,
            -10000 => NetError::UnknownService {
                service: String::new(),
            },
            -10001 => NetError::EngineStopped,
            -10002 => NetError::WorkerStartFailed {
                reason: String::new(),
            },
            _ => NetError::Unknown(code),
        }
    }
}
