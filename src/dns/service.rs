//! Service (port) names for resolution requests.

use crate::base::neterror::NetError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known service names understood without a services database.
const WELL_KNOWN: &[(&str, u16)] = &[
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("domain", 53),
    ("dns", 53),
    ("http", 80),
    ("pop3", 110),
    ("imap", 143),
    ("ldap", 389),
    ("https", 443),
    ("imaps", 993),
    ("pop3s", 995),
];

/// A port name (`"http"`) or number (`"8080"`) attached to a request.
#[derive(Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Service {
    name: Box<str>,
}

impl Service {
    #[inline]
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Maps the service to a port number.
    pub fn port(&self) -> Result<u16, NetError> {
        let name = self.name.trim();
        if let Ok(port) = name.parse::<u16>() {
            return Ok(port);
        }
        WELL_KNOWN
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, port)| *port)
            .ok_or_else(|| NetError::UnknownService {
                service: self.name.to_string(),
            })
    }
}

impl Default for Service {
    fn default() -> Self {
        Service::new("http")
    }
}

impl From<&str> for Service {
    fn from(value: &str) -> Self {
        Service::new(value)
    }
}

impl From<String> for Service {
    fn from(value: String) -> Self {
        Service::new(value)
    }
}

impl From<u16> for Service {
    fn from(value: u16) -> Self {
        Service::new(value.to_string())
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.name, f)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}
