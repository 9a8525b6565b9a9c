//! Runtime configuration of the solver.
//!
//! The configuration can be created in code (`SolverConfig::default()`) or loaded from
//! a TOML file where every field is optional:
//!
//! ```toml
//! max_cut_sets = 100000
//! max_inclusion_exclusion_sets = 24
//! probability_tolerance = 1e-9
//! on_error = "skip"
//! ```

use crate::PraError;
use serde::Deserialize;
use std::path::Path;

/// What the scenario pipeline does when a single scenario fails.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// The first failing scenario aborts the whole evaluation.
    Abort,
    /// Failing scenarios are logged, recorded in the report and skipped.
    Skip,
}

/// Limits and policies used when evaluating a model.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Maximal number of (intermediate) product terms produced by the minimizer.
    pub max_cut_sets: usize,
    /// Maximal number of minimal cut sets for which we run inclusion–exclusion
    /// (the cost is $2^n$ in this number).
    pub max_inclusion_exclusion_sets: usize,
    /// Allowed floating point drift outside of $[0, 1]$ before a warning is logged.
    pub probability_tolerance: f64,
    pub on_error: ErrorPolicy,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Abort
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_cut_sets: 100_000,
            max_inclusion_exclusion_sets: 24,
            probability_tolerance: 1e-9,
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl SolverConfig {
    /// Parse a configuration from a TOML string. Missing fields use default values.
    pub fn from_toml_str(data: &str) -> Result<SolverConfig, PraError> {
        let config: SolverConfig =
            toml::from_str(data).map_err(|e| PraError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<SolverConfig, PraError> {
        let data = std::fs::read_to_string(path).map_err(|source| PraError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    fn validate(&self) -> Result<(), PraError> {
        if !(self.probability_tolerance.is_finite() && self.probability_tolerance >= 0.0) {
            return Err(PraError::Config(format!(
                "Probability tolerance must be a non-negative number, found {}.",
                self.probability_tolerance
            )));
        }
        if self.max_inclusion_exclusion_sets >= 64 {
            return Err(PraError::Config(format!(
                "Inclusion-exclusion over {} cut sets is not feasible.",
                self.max_inclusion_exclusion_sets
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorPolicy, PraError, SolverConfig};

    #[test]
    fn config_defaults() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(SolverConfig::default(), config);
        assert_eq!(ErrorPolicy::Abort, config.on_error);
    }

    #[test]
    fn config_partial_override() {
        let toml = "on_error = \"skip\"\nmax_cut_sets = 10\n";
        let config = SolverConfig::from_toml_str(toml).unwrap();
        assert_eq!(ErrorPolicy::Skip, config.on_error);
        assert_eq!(10, config.max_cut_sets);
        assert_eq!(24, config.max_inclusion_exclusion_sets);
    }

    #[test]
    fn config_invalid() {
        assert!(matches!(
            SolverConfig::from_toml_str("unknown_field = 3"),
            Err(PraError::Config(_))
        ));
        assert!(matches!(
            SolverConfig::from_toml_str("on_error = \"retry\""),
            Err(PraError::Config(_))
        ));
        assert!(matches!(
            SolverConfig::from_toml_str("probability_tolerance = -1.0"),
            Err(PraError::Config(_))
        ));
        assert!(matches!(
            SolverConfig::from_toml_str("max_inclusion_exclusion_sets = 80"),
            Err(PraError::Config(_))
        ));
    }

    #[test]
    fn config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solver.toml");
        std::fs::write(&path, "max_inclusion_exclusion_sets = 12").unwrap();
        let config = SolverConfig::from_file(&path).unwrap();
        assert_eq!(12, config.max_inclusion_exclusion_sets);
        assert!(matches!(
            SolverConfig::from_file(&dir.path().join("missing.toml")),
            Err(PraError::Io { .. })
        ));
    }
}
