//! API versions and the versioned method naming convention.
//!
//! A controller method implementing version `M.N` of action `X` is named
//! `X_M_N`; the separator stands in for both the action/version divider and
//! the decimal point. An unsuffixed `X` is version `0`.
//!
//! ```text
//! show        -> show, 0.0
//! show_1_2    -> show, 1.2
//! show_2      -> show, 2.0
//! show_       -> malformed
//! show_all    -> show_all, 0.0
//! ```

use std::{fmt, str::FromStr};
use thiserror::Error;

/// The character separating the action name from its version components.
pub const SEPARATOR: char = '_';

/// A `major.minor` API version, ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ApiVersion {
    major: u32,
    minor: u32,
}

impl ApiVersion {
    /// The version of an unsuffixed method.
    pub const ZERO: ApiVersion = ApiVersion::new(0, 0);

    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The major component.
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// The minor component.
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Whether this is version `0`.
    pub const fn is_zero(&self) -> bool {
        self.major == 0 && self.minor == 0
    }

    /// The method-name suffix for this version, e.g. `1_2`.
    ///
    /// Version `0` has no suffix.
    pub fn suffix(&self) -> Option<String> {
        if self.is_zero() {
            None
        } else {
            Some(format!("{}{SEPARATOR}{}", self.major, self.minor))
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Error returned when a version string is not `major[.minor]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{input}` is not a numeric major[.minor] version")]
pub struct VersionParseError {
    input: String,
}

impl VersionParseError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError {
            input: s.to_owned(),
        };
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (s, None),
        };
        let major = component(major).ok_or_else(err)?;
        let minor = match minor {
            Some(minor) => component(minor).ok_or_else(err)?,
            None => 0,
        };
        Ok(ApiVersion::new(major, minor))
    }
}

/// Parse one all-digit version component.
fn component(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// The result of reading a method name against the naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedMethod<'a> {
    /// No version suffix; the method is version `0` of the action it names.
    Plain(&'a str),
    /// A versioned implementation of `base`.
    Versioned {
        /// The base action name.
        base: &'a str,
        /// The version encoded in the suffix.
        version: ApiVersion,
    },
    /// A name ending in a bare separator, e.g. `show_`.
    Malformed(&'a str),
}

impl<'a> ParsedMethod<'a> {
    /// The base action and version, or `None` for malformed names.
    pub fn action(&self) -> Option<(&'a str, ApiVersion)> {
        match *self {
            ParsedMethod::Plain(name) => Some((name, ApiVersion::ZERO)),
            ParsedMethod::Versioned { base, version } => Some((base, version)),
            ParsedMethod::Malformed(_) => None,
        }
    }
}

/// A base action name paired with a version.
///
/// `Display` renders the concrete method name: `show` at `2.1` is `show_2_1`,
/// at `0` it is just `show`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionedMethodName {
    base: String,
    version: ApiVersion,
}

impl VersionedMethodName {
    /// Pair an action with a version.
    pub fn new(base: impl Into<String>, version: ApiVersion) -> Self {
        Self {
            base: base.into(),
            version,
        }
    }

    /// The base action name.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The version.
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Read a method name against the naming convention.
    pub fn parse(name: &str) -> ParsedMethod<'_> {
        if name.is_empty() || name.ends_with(SEPARATOR) {
            return ParsedMethod::Malformed(name);
        }

        let mut parts = name.rsplitn(3, SEPARATOR);
        let last = parts.next().unwrap_or(name);
        let Some(last_num) = component(last) else {
            return ParsedMethod::Plain(name);
        };
        let Some(mid) = parts.next() else {
            return ParsedMethod::Plain(name);
        };

        if let (Some(major), Some(base)) = (component(mid), parts.next()) {
            if !base.is_empty() {
                return ParsedMethod::Versioned {
                    base,
                    version: ApiVersion::new(major, last_num),
                };
            }
        }

        let base = &name[..name.len() - last.len() - SEPARATOR.len_utf8()];
        if base.is_empty() {
            ParsedMethod::Plain(name)
        } else {
            ParsedMethod::Versioned {
                base,
                version: ApiVersion::new(last_num, 0),
            }
        }
    }
}

impl fmt::Display for VersionedMethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version.suffix() {
            Some(suffix) => write!(f, "{}{SEPARATOR}{suffix}", self.base),
            None => f.write_str(&self.base),
        }
    }
}
