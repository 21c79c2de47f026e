#![warn(missing_docs)]
//! e2ediff Core
//!
//! Identity types shared by every stage of the comparison pipeline:
//! - [`FilenameMetadata`] recovered from a result filename
//! - [`SoftwareKey`], the (OS, browser, client) triple used for grouping and joining

mod filename;
mod software;

pub use filename::{FILENAME_SEGMENTS, FilenameMetadata, FormatError, parse_filename};
pub use software::SoftwareKey;
