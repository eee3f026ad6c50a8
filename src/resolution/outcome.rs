//! Per-request resolution results.

use crate::base::neterror::NetError;
use crate::dns::Service;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// How a single resolution attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Addresses in the order the provider returned them.
    Resolved(Vec<IpAddr>),
    NotFound,
    /// The engine's timer fired before the provider answered.
    TimedOut,
    /// The lookup was aborted for another reason, e.g. engine shutdown.
    Cancelled,
    OtherError(String),
}

impl ResolutionOutcome {
    /// Classify a provider error.
    pub fn from_error(err: &NetError) -> Self {
        if err.is_not_found() {
            ResolutionOutcome::NotFound
        } else if err.is_cancelled() {
            ResolutionOutcome::Cancelled
        } else {
            ResolutionOutcome::OtherError(err.to_string())
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    /// Resolved addresses, if any.
    pub fn ips(&self) -> Option<&[IpAddr]> {
        match self {
            ResolutionOutcome::Resolved(ips) => Some(ips),
            _ => None,
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Resolved(ips) => {
                f.write_str("resolved [")?;
                for (i, ip) in ips.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ip}")?;
                }
                f.write_str("]")
            }
            ResolutionOutcome::NotFound => f.write_str("host not found"),
            ResolutionOutcome::TimedOut => f.write_str("timed out"),
            ResolutionOutcome::Cancelled => f.write_str("cancelled"),
            ResolutionOutcome::OtherError(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// Report emitted once per request that started resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub host: String,
    pub service: Service,
    pub outcome: ResolutionOutcome,
    /// Time from starting the lookup to deciding the outcome.
    pub elapsed: Duration,
}
