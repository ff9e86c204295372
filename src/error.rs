//! Error types for configuration validation.
//!
//! The simulation has no I/O and no transient failures; the only thing that
//! can go wrong is a bad configuration, and that is rejected when the system
//! is built, never mid-tick. A tick loop cannot meaningfully recover from an
//! unanswerable spline query, so it never gets the chance to ask one.

use std::fmt;

/// Rejected configurations, returned by
/// [`ParticleSystemBuilder::build`](crate::system::ParticleSystemBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value spline has no knots; it has no defined value at any age.
    EmptySpline(&'static str),
    /// Emission rate must be positive and finite.
    NonPositiveRate,
    /// A spawn randomization range is empty or reversed.
    EmptyRange(&'static str),
    /// A spawn jitter spread is negative or non-finite.
    InvalidSpread(&'static str),
    /// The burst duration must be positive and finite.
    NonPositiveBurst,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySpline(which) => {
                write!(f, "{} spline has no knots; add at least one", which)
            }
            ConfigError::NonPositiveRate => {
                write!(f, "emission rate must be a positive number of particles per second")
            }
            ConfigError::EmptyRange(which) => {
                write!(f, "spawn range {} is empty; start must be below end", which)
            }
            ConfigError::InvalidSpread(which) => {
                write!(f, "spawn spread {} must be a finite value >= 0", which)
            }
            ConfigError::NonPositiveBurst => {
                write!(f, "burst duration must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_spline() {
        let e = ConfigError::EmptySpline("alpha");
        assert!(e.to_string().contains("alpha"));
    }

    #[test]
    fn test_display_names_the_range() {
        let e = ConfigError::EmptyRange("life_range");
        assert!(e.to_string().contains("life_range"));
    }
}
