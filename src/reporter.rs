//! Diagnostic Reporter - single entry point
//!
//! All ten queries complete before the first byte is written, so a failing
//! provider never leaves a partial report behind.

use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

use crate::error::InfoError;
use crate::hashing::fingerprint;
use crate::info::BuildInfo;
use crate::profile::BuildProfile;
use crate::provider::BuildInfoProvider;
use crate::requirements::{RequirementChecker, RequirementResult, Requirements};

/// Line labels in report order, padded so the colons line up.
pub const LABELS: [&str; 10] = [
    "ImageMagick version      ",
    "ImageMagick release data ",
    "ImageMagick quantum range",
    "ImageMagick quantum depth",
    "ImageMagick package name ",
    "ImageMagick license      ",
    "ImageMagick home URL     ",
    "ImageMagick features     ",
    "ImageMagick delegates    ",
    "ImageMagick copyright    ",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The printed value for each label, in the same order as [`LABELS`].
pub fn values(info: &BuildInfo) -> [&str; 10] {
    [
        info.version.as_str(),
        info.release_date.as_str(),
        info.quantum_range.as_str(),
        info.quantum_depth.as_str(),
        info.package_name.as_str(),
        info.license.as_str(),
        info.home_url.as_str(),
        info.features.as_str(),
        info.delegates.as_str(),
        info.copyright.as_str(),
    ]
}

/// Write the ten `<Label>: <value>` lines. Values are printed as-is.
pub fn write_text<W: Write>(info: &BuildInfo, out: &mut W) -> Result<(), InfoError> {
    for (label, value) in LABELS.iter().zip(values(info)) {
        writeln!(out, "{label}: {value}")?;
    }
    out.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub info: &'a BuildInfo,
    pub profile: Option<BuildProfile>,
    pub libraries: Vec<String>,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<&'a RequirementResult>,
}

impl<'a> JsonReport<'a> {
    pub fn new(info: &'a BuildInfo, requirements: Option<&'a RequirementResult>) -> Result<Self, InfoError> {
        let profile = match BuildProfile::from_build_info(info) {
            Ok(profile) => Some(profile),
            Err(e) => {
                debug!(error = %e, "no build profile for report");
                None
            }
        };
        let libraries = profile.map(|p| p.libraries()).unwrap_or_default();

        Ok(Self {
            info,
            profile,
            libraries,
            fingerprint: fingerprint(info)?,
            requirements,
        })
    }
}

pub fn write_json<W: Write>(report: &JsonReport<'_>, out: &mut W) -> Result<(), InfoError> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Queries a provider and renders its report.
pub struct Reporter<'p> {
    provider: &'p dyn BuildInfoProvider,
    requirements: Requirements,
    checker: RequirementChecker,
}

impl<'p> Reporter<'p> {
    pub fn new(provider: &'p dyn BuildInfoProvider) -> Self {
        Self {
            provider,
            requirements: Requirements::default(),
            checker: RequirementChecker::new(),
        }
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn collect(&self) -> BuildInfo {
        BuildInfo::collect(self.provider)
    }

    /// Collect, write the report, then check requirements.
    ///
    /// The report is written even when requirements fail; the caller
    /// decides what an unsatisfied result means for the exit status.
    pub fn run<W: Write>(&self, out: &mut W, format: OutputFormat) -> Result<RequirementResult, InfoError> {
        let build = self.collect();
        info!(package = %build.package_name, version = %build.version, "collected build information");

        let result = self.checker.check(&build, &self.requirements);

        match format {
            OutputFormat::Text => write_text(&build, out)?,
            OutputFormat::Json => {
                let requirements = (!self.requirements.is_empty()).then_some(&result);
                write_json(&JsonReport::new(&build, requirements)?, out)?;
            }
        }

        if !result.violations.is_empty() {
            info!(
                violations = result.violations.len(),
                satisfied = result.satisfied,
                "requirement check finished"
            );
        }
        Ok(result)
    }
}
