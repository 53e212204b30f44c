//! magick-info - ImageMagick build information reporter
//!
//! Queries a build-information provider (the linked MagickCore library, or a
//! captured snapshot) and prints the ten labeled lines of its identity and
//! build configuration.

pub mod error;
pub mod provider;
pub mod info;
pub mod profile;
pub mod requirements;
pub mod hashing;
pub mod reporter;
#[cfg(feature = "magickcore")]
pub mod magick;

pub use error::InfoError;
pub use provider::BuildInfoProvider;
pub use info::BuildInfo;
pub use profile::{BuildProfile, MagickRelease, QuantumDepth};
pub use requirements::{RequirementChecker, RequirementResult, RequirementViolation, Requirements};
pub use hashing::{canonical_json, fingerprint};
pub use reporter::{OutputFormat, Reporter, LABELS};
#[cfg(feature = "magickcore")]
pub use magick::MagickCore;

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
