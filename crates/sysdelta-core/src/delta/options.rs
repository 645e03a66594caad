//! Delta computation options.
//!
//! Options may be built in code or loaded from TOML; missing keys take their
//! defaults.
//!
//! ```toml
//! threshold_precision = 2
//! include_resolved = true
//! ```

use crate::errors::{DeltaError, Result};
use crate::model::Issue;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD_PRECISION: u32 = 2;

/// Largest precision at which f64 rounding is still meaningful
pub const MAX_THRESHOLD_PRECISION: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeltaOptions {
    /// Decimal places metric values are rounded to before comparing
    pub threshold_precision: u32,
    /// When false, fixed and ignored issues are left out on both sides
    pub include_resolved: bool,
}

impl Default for DeltaOptions {
    fn default() -> Self {
        Self {
            threshold_precision: DEFAULT_THRESHOLD_PRECISION,
            include_resolved: true,
        }
    }
}

impl DeltaOptions {
    /// Parse options from a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidOptions` if the document does not parse, contains unknown keys,
    /// or fails [`DeltaOptions::validate`].
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let options: DeltaOptions =
            toml::from_str(input).map_err(|e| DeltaError::InvalidOptions {
                reason: e.to_string(),
            })?;
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    ///
    /// `InvalidOptions` if `threshold_precision` exceeds [`MAX_THRESHOLD_PRECISION`].
    pub fn validate(&self) -> Result<()> {
        if self.threshold_precision > MAX_THRESHOLD_PRECISION {
            return Err(DeltaError::InvalidOptions {
                reason: format!(
                    "threshold_precision must be at most {}, got {}",
                    MAX_THRESHOLD_PRECISION, self.threshold_precision
                ),
            });
        }
        Ok(())
    }

    /// Whether an issue takes part in the delta under these options
    pub fn includes(&self, issue: &Issue) -> bool {
        self.include_resolved || !issue.resolution().is_resolved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NamedElement, ResolutionType, SingleElementIssue};

    #[test]
    fn test_empty_toml_yields_defaults() {
        let options = DeltaOptions::from_toml_str("").unwrap();
        assert_eq!(options, DeltaOptions::default());
        assert_eq!(options.threshold_precision, 2);
        assert!(options.include_resolved);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let options = DeltaOptions::from_toml_str("include_resolved = false").unwrap();
        assert!(!options.include_resolved);
        assert_eq!(options.threshold_precision, DEFAULT_THRESHOLD_PRECISION);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DeltaOptions::from_toml_str("precision = 3").unwrap_err();
        assert!(matches!(err, DeltaError::InvalidOptions { .. }));
    }

    #[test]
    fn test_excessive_precision_rejected() {
        let err = DeltaOptions::from_toml_str("threshold_precision = 40").unwrap_err();
        assert!(err.to_string().contains("threshold_precision"));
    }

    #[test]
    fn test_resolved_issues_filtered_when_excluded() {
        let fixed: Issue =
            SingleElementIssue::new("Todo", "TODO", NamedElement::new("pkg.A", "A"), 1, 1)
                .with_resolution(ResolutionType::Fixed)
                .into();
        let options = DeltaOptions {
            include_resolved: false,
            ..DeltaOptions::default()
        };
        assert!(!options.includes(&fixed));
        assert!(DeltaOptions::default().includes(&fixed));
    }
}
