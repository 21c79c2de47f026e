//! Result Filename Parsing
//!
//! Every E2E result row carries the name of the JSON file the run produced,
//! and that name encodes the software under test:
//!
//! ```text
//! osx10.12-chrome57-ndt_js-2017-04-06T215733Z-results.json
//! └──┬───┘ └───┬──┘ └─┬──┘ └───────┬───────┘ └────┬─────┘
//!  os+ver  browser+ver client   timestamp        suffix
//! ```

use crate::software::SoftwareKey;
use regex::Regex;
use std::sync::LazyLock;

/// Number of dash-separated segments in a well-formed result filename
pub const FILENAME_SEGMENTS: usize = 7;

// Lowercase name immediately followed by a version starting with a digit,
// e.g. "chrome57" or "ubuntu14.04".
static NAME_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)([0-9].*)$").expect("name/version pattern is valid"));

/// Metadata extracted from a single result filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameMetadata {
    /// Operating system name (e.g. "osx")
    pub os: String,
    /// Operating system version (e.g. "10.12")
    pub os_version: String,
    /// Browser name (e.g. "chrome")
    pub browser: String,
    /// Browser version (e.g. "57")
    pub browser_version: String,
    /// Client name, unversioned (e.g. "ndt_js")
    pub client: String,
    /// Test timestamp (e.g. "2017-04-06T215733Z")
    pub timestamp: String,
}

impl FilenameMetadata {
    /// Software identity this result belongs to
    pub fn software(&self) -> SoftwareKey {
        SoftwareKey::new(&self.os, &self.browser, &self.client)
    }
}

impl std::str::FromStr for FilenameMetadata {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_filename(s)
    }
}

/// Parse a result filename into its metadata.
///
/// The name must split on `-` into exactly [`FILENAME_SEGMENTS`] parts. The
/// first two parts are `<name><version>` pairs for the OS and browser, the
/// third is the client, the next three are rejoined into the timestamp and the
/// last one (`results.json`) is ignored.
pub fn parse_filename(filename: &str) -> Result<FilenameMetadata, FormatError> {
    let parts: Vec<&str> = filename.split('-').collect();
    if parts.len() != FILENAME_SEGMENTS {
        return Err(FormatError::SegmentCount {
            filename: filename.to_string(),
            found: parts.len(),
        });
    }

    let (os, os_version) = split_name_version(parts[0]).ok_or_else(|| FormatError::OsSegment {
        segment: parts[0].to_string(),
    })?;
    let (browser, browser_version) =
        split_name_version(parts[1]).ok_or_else(|| FormatError::BrowserSegment {
            segment: parts[1].to_string(),
        })?;

    Ok(FilenameMetadata {
        os,
        os_version,
        browser,
        browser_version,
        client: parts[2].to_string(),
        timestamp: parts[3..6].join("-"),
    })
}

fn split_name_version(segment: &str) -> Option<(String, String)> {
    let caps = NAME_VERSION.captures(segment)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Errors from filename parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The name does not split into the expected number of segments
    #[error(
        "Unknown filename format: expected {} segments, found {found} in '{filename}'",
        FILENAME_SEGMENTS
    )]
    SegmentCount {
        /// Filename as given
        filename: String,
        /// Number of segments found
        found: usize,
    },
    /// The first segment is not `<os><version>`
    #[error("Could not determine OS and version from: {segment}")]
    OsSegment {
        /// Offending segment
        segment: String,
    },
    /// The second segment is not `<browser><version>`
    #[error("Could not determine browser and version from: {segment}")]
    BrowserSegment {
        /// Offending segment
        segment: String,
    },
}
