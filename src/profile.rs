//! Build Profile - release version, quantum depth and HDRI
//!
//! Mirrors how ImageMagick packages name their libraries:
//! `MagickCore-7.Q16HDRI` for a major 7, 16-bit, HDRI build.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InfoError;
use crate::info::BuildInfo;

/// Libraries an ImageMagick package ships, in link order.
pub const LIBRARIES: [&str; 3] = ["MagickCore", "MagickWand", "Magick++"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum QuantumDepth {
    Q8,
    Q16,
    Q32,
}

impl QuantumDepth {
    pub fn bits(self) -> u32 {
        match self {
            Self::Q8 => 8,
            Self::Q16 => 16,
            Self::Q32 => 32,
        }
    }

    pub fn from_bits(bits: usize) -> Option<Self> {
        match bits {
            8 => Some(Self::Q8),
            16 => Some(Self::Q16),
            32 => Some(Self::Q32),
            _ => None,
        }
    }
}

impl fmt::Display for QuantumDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.bits())
    }
}

/// Accepts `16` as well as MagickCore's own `Q16` spelling.
impl FromStr for QuantumDepth {
    type Err = InfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .unwrap_or(trimmed);
        digits
            .parse::<usize>()
            .ok()
            .and_then(Self::from_bits)
            .ok_or_else(|| InfoError::InvalidQuantumDepth(s.to_string()))
    }
}

impl TryFrom<u32> for QuantumDepth {
    type Error = InfoError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits as usize).ok_or_else(|| InfoError::InvalidQuantumDepth(bits.to_string()))
    }
}

impl From<QuantumDepth> for u32 {
    fn from(depth: QuantumDepth) -> Self {
        depth.bits()
    }
}

/// An ImageMagick release such as `7.0.8-10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagickRelease {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub patchlevel: Option<u32>,
}

impl MagickRelease {
    /// Find the first `M.m.p[-N]` token in a version string like
    /// `ImageMagick 7.0.8-10 Q16 x86_64 2018-08-12`.
    pub fn parse(version: &str) -> Option<Self> {
        version.split_whitespace().find_map(Self::parse_token)
    }

    fn parse_token(token: &str) -> Option<Self> {
        let (core, patchlevel) = match token.split_once('-') {
            Some((core, level)) => (core, Some(level.parse().ok()?)),
            None => (token, None),
        };
        let mut parts = core.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { major, minor, patch, patchlevel })
    }

    /// Decode the packed `MagickLibVersion` number, e.g. `0x708` is 7.0.8.
    pub fn from_lib_version(code: usize) -> Option<Self> {
        if code == 0 {
            return None;
        }
        Some(Self {
            major: ((code >> 8) & 0xff) as u32,
            minor: ((code >> 4) & 0xf) as u32,
            patch: (code & 0xf) as u32,
            patchlevel: None,
        })
    }

    /// Prefer the version string; fall back to the numeric code.
    pub fn from_build_info(info: &BuildInfo) -> Result<Self, InfoError> {
        Self::parse(&info.version)
            .or_else(|| Self::from_lib_version(info.version_number))
            .ok_or_else(|| InfoError::InvalidVersion(info.version.clone()))
    }

    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major.into(), self.minor.into(), self.patch.into())
    }
}

impl fmt::Display for MagickRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(level) = self.patchlevel {
            write!(f, "-{level}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildProfile {
    pub major: u32,
    pub quantum_depth: QuantumDepth,
    pub hdri: bool,
}

impl BuildProfile {
    pub fn from_build_info(info: &BuildInfo) -> Result<Self, InfoError> {
        let release = MagickRelease::from_build_info(info)?;
        let quantum_depth = match QuantumDepth::from_bits(info.quantum_depth_value) {
            Some(depth) => depth,
            None => info.quantum_depth.parse()?,
        };
        let hdri = info.feature_tokens().any(|t| t == "HDRI");

        Ok(Self {
            major: release.major,
            quantum_depth,
            hdri,
        })
    }

    /// `MagickCore` becomes `MagickCore-7.Q16HDRI`
    pub fn library_name(&self, library: &str) -> String {
        let suffix = if self.hdri { "HDRI" } else { "" };
        format!("{}-{}.{}{}", library, self.major, self.quantum_depth, suffix)
    }

    pub fn libraries(&self) -> Vec<String> {
        LIBRARIES.iter().map(|lib| self.library_name(lib)).collect()
    }
}
