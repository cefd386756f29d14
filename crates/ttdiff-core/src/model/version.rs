use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DumpError;

/// Release channel letter of a build tag, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReleaseKind {
    Experimental,
    Alpha,
    Beta,
    Final,
    Patch,
}

impl ReleaseKind {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'x' => Some(ReleaseKind::Experimental),
            'a' => Some(ReleaseKind::Alpha),
            'b' => Some(ReleaseKind::Beta),
            'f' => Some(ReleaseKind::Final),
            'p' => Some(ReleaseKind::Patch),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            ReleaseKind::Experimental => 'x',
            ReleaseKind::Alpha => 'a',
            ReleaseKind::Beta => 'b',
            ReleaseKind::Final => 'f',
            ReleaseKind::Patch => 'p',
        }
    }
}

/// Release suffix of a build tag, e.g. `f1` in `2019.3.0f1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Release {
    pub kind: ReleaseKind,
    pub number: u32,
}

/// Three-part engine version with an optional release suffix
///
/// Ordered field by field; a version without a release suffix sorts before
/// any suffixed version with the same numbers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub release: Option<Release>,
}

impl Version {
    pub fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
            release: None,
        }
    }

    pub fn with_release(mut self, kind: ReleaseKind, number: u32) -> Self {
        self.release = Some(Release { kind, number });
        self
    }

    /// Assemble a version from the three dot-separated header components
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::InvalidVersion`] if any component is malformed.
    pub fn from_parts(major: &str, minor: &str, build_type: &str) -> Result<Self, DumpError> {
        let full = format!("{}.{}.{}", major, minor, build_type);
        let number = |s: &str, what: &str| {
            s.parse::<u32>().map_err(|_| DumpError::InvalidVersion {
                value: full.clone(),
                reason: format!("{} component '{}' is not a number", what, s),
            })
        };

        let major = number(major, "major")?;
        let minor = number(minor, "minor")?;

        let split = build_type
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(build_type.len());
        let (build, suffix) = build_type.split_at(split);
        let build = number(build, "build")?;

        let mut chars = suffix.chars();
        let release = match chars.next() {
            None => None,
            Some(letter) => {
                let kind =
                    ReleaseKind::from_letter(letter).ok_or_else(|| DumpError::InvalidVersion {
                        value: full.clone(),
                        reason: format!("unknown release kind '{}'", letter),
                    })?;
                let number = number(chars.as_str(), "release")?;
                Some(Release { kind, number })
            }
        };

        Ok(Self {
            major,
            minor,
            build,
            release,
        })
    }
}

impl FromStr for Version {
    type Err = DumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), Some(build_type)) => {
                Version::from_parts(major, minor, build_type)
            }
            _ => Err(DumpError::InvalidVersion {
                value: s.to_string(),
                reason: "expected <major>.<minor>.<build>".to_string(),
            }),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)?;
        if let Some(release) = self.release {
            write!(f, "{}{}", release.kind.letter(), release.number)?;
        }
        Ok(())
    }
}
