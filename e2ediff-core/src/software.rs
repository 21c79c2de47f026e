//! Software Identity

use std::fmt;

/// The (OS, browser, client) triple identifying one tested configuration.
///
/// Ordering is field-wise, which matches sorting by the `os-browser-client`
/// display form since neither name segment may contain a dash.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SoftwareKey {
    /// Operating system name
    pub os: String,
    /// Browser name
    pub browser: String,
    /// Client name
    pub client: String,
}

impl SoftwareKey {
    /// Create a key from its three components
    pub fn new(os: impl Into<String>, browser: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            browser: browser.into(),
            client: client.into(),
        }
    }
}

impl fmt::Display for SoftwareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.os, self.browser, self.client)
    }
}
