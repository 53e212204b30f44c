//! Build-Information Provider
//!
//! The seam between the reporter and whatever answers the ten build
//! queries: the linked MagickCore library, a captured snapshot, or a mock.

#[cfg(test)]
use mockall::automock;

/// Read-only queries against a library's static build configuration.
///
/// Queries that fill a numeric out-parameter in the C API return it as the
/// second element of the tuple. Implementations must not cache or mutate
/// anything observable between calls.
#[cfg_attr(test, automock)]
pub trait BuildInfoProvider {
    /// Version string and packed numeric version (e.g. `0x708`)
    fn version(&self) -> (String, usize);
    fn release_date(&self) -> String;
    /// Quantum range as text and as a number
    fn quantum_range(&self) -> (String, usize);
    /// Quantum depth as text (`Q16`) and as a number of bits
    fn quantum_depth(&self) -> (String, usize);
    fn package_name(&self) -> String;
    fn license(&self) -> String;
    fn home_url(&self) -> String;
    /// Space separated compiled feature flags
    fn features(&self) -> String;
    /// Space separated delegate libraries
    fn delegates(&self) -> String;
    fn copyright(&self) -> String;
}
