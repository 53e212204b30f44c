//! Requirement Checks
//!
//! Rules compare a collected report against what the caller expects the
//! linked build to provide: delegate and feature tokens, quantum depth and
//! a minimum release.

use serde::{Deserialize, Serialize};

use crate::info::BuildInfo;
use crate::profile::{BuildProfile, MagickRelease, QuantumDepth};

/// A requirement the build does not meet. Every violation fails the check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementViolation {
    pub rule: String,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementResult {
    pub satisfied: bool,
    pub violations: Vec<RequirementViolation>,
}

/// What the caller expects of the linked build. Empty means "nothing".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub delegates: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub quantum_depth: Option<QuantumDepth>,
    #[serde(default)]
    pub min_version: Option<semver::Version>,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
            && self.features.is_empty()
            && self.quantum_depth.is_none()
            && self.min_version.is_none()
    }
}

pub trait RequirementRule {
    fn name(&self) -> &'static str;
    fn check(&self, info: &BuildInfo, requirements: &Requirements) -> Vec<RequirementViolation>;
}

/// How a listed token may satisfy a required one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenMatching {
    /// Whole-token, case-sensitive equality
    Exact,
    /// Also accepts a parenthesised suffix: `OpenMP` matches `OpenMP(4.5)`
    AllowVersionSuffix,
}

impl TokenMatching {
    fn accepts(self, token: &str, wanted: &str) -> bool {
        match self {
            Self::Exact => token == wanted,
            Self::AllowVersionSuffix => {
                token == wanted
                    || token
                        .strip_prefix(wanted)
                        .is_some_and(|rest| rest.starts_with('('))
            }
        }
    }
}

fn token_violations<'a>(
    rule: &str,
    matching: TokenMatching,
    tokens: impl Iterator<Item = &'a str> + Clone,
    listed: &str,
    wanted: &[String],
) -> Vec<RequirementViolation> {
    wanted
        .iter()
        .filter(|token| !tokens.clone().any(|t| matching.accepts(t, token)))
        .map(|token| {
            // Name a case-only near miss so the message says what was listed
            let near = tokens
                .clone()
                .find(|t| matching.accepts(&t.to_lowercase(), &token.to_lowercase()));
            let message = match near {
                Some(found) => format!("{rule} {token} wasn't enabled (listed as {found})"),
                None => format!("{rule} {token} wasn't enabled"),
            };
            RequirementViolation {
                rule: rule.to_string(),
                message,
                expected: Some(token.clone()),
                actual: Some(listed.to_string()),
            }
        })
        .collect()
}

// --- Concrete Rules ---

pub struct DelegateRule;

impl RequirementRule for DelegateRule {
    fn name(&self) -> &'static str { "delegate" }

    fn check(&self, info: &BuildInfo, requirements: &Requirements) -> Vec<RequirementViolation> {
        token_violations(
            self.name(),
            TokenMatching::Exact,
            info.delegate_tokens(),
            &info.delegates,
            &requirements.delegates,
        )
    }
}

pub struct FeatureRule;

impl RequirementRule for FeatureRule {
    fn name(&self) -> &'static str { "feature" }

    fn check(&self, info: &BuildInfo, requirements: &Requirements) -> Vec<RequirementViolation> {
        token_violations(
            self.name(),
            TokenMatching::AllowVersionSuffix,
            info.feature_tokens(),
            &info.features,
            &requirements.features,
        )
    }
}

pub struct QuantumDepthRule;

impl RequirementRule for QuantumDepthRule {
    fn name(&self) -> &'static str { "quantum_depth" }

    fn check(&self, info: &BuildInfo, requirements: &Requirements) -> Vec<RequirementViolation> {
        let Some(expected) = requirements.quantum_depth else {
            return vec![];
        };

        match BuildProfile::from_build_info(info) {
            Ok(profile) if profile.quantum_depth == expected => vec![],
            Ok(profile) => vec![RequirementViolation {
                rule: self.name().to_string(),
                message: "Quantum depth mismatch".to_string(),
                expected: Some(expected.to_string()),
                actual: Some(profile.quantum_depth.to_string()),
            }],
            Err(e) => vec![RequirementViolation {
                rule: self.name().to_string(),
                message: e.to_string(),
                expected: Some(expected.to_string()),
                actual: Some(info.quantum_depth.clone()),
            }],
        }
    }
}

pub struct MinVersionRule;

impl RequirementRule for MinVersionRule {
    fn name(&self) -> &'static str { "min_version" }

    fn check(&self, info: &BuildInfo, requirements: &Requirements) -> Vec<RequirementViolation> {
        let Some(min) = &requirements.min_version else {
            return vec![];
        };

        match MagickRelease::from_build_info(info) {
            Ok(release) if release.to_semver() >= *min => vec![],
            Ok(release) => vec![RequirementViolation {
                rule: self.name().to_string(),
                message: "ImageMagick release too old".to_string(),
                expected: Some(format!(">= {min}")),
                actual: Some(release.to_string()),
            }],
            Err(e) => vec![RequirementViolation {
                rule: self.name().to_string(),
                message: e.to_string(),
                expected: Some(format!(">= {min}")),
                actual: Some(info.version.clone()),
            }],
        }
    }
}

/// Runs every rule; any violation makes the result unsatisfied.
pub struct RequirementChecker {
    rules: Vec<Box<dyn RequirementRule>>,
}

impl RequirementChecker {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(DelegateRule),
                Box::new(FeatureRule),
                Box::new(QuantumDepthRule),
                Box::new(MinVersionRule),
            ],
        }
    }

    pub fn check(&self, info: &BuildInfo, requirements: &Requirements) -> RequirementResult {
        let violations: Vec<_> = self
            .rules
            .iter()
            .flat_map(|rule| rule.check(info, requirements))
            .collect();
        let satisfied = violations.is_empty();

        RequirementResult { satisfied, violations }
    }
}

impl Default for RequirementChecker {
    fn default() -> Self {
        Self::new()
    }
}
