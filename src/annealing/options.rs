//! SA configuration.

use crate::error::{OptimError, Result};

/// Configuration for simulated annealing with geometric cooling.
///
/// # Examples
///
/// ```
/// use optsim::annealing::SaOptions;
///
/// let options = SaOptions::builder()
///     .initial_temp(10.0)
///     .cooling_rate(0.98)
///     .max_steps(2_000)
///     .build();
///
/// assert!(options.validate().is_ok());
/// assert_eq!(options.min_temp, 0.01);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SaOptions {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temp: f64,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = cooling_rate * T_k`.
    pub cooling_rate: f64,

    /// The run stops once the temperature is no longer above this.
    pub min_temp: f64,

    /// Hard budget on the number of steps.
    pub max_steps: usize,
}

impl Default for SaOptions {
    fn default() -> Self {
        Self {
            initial_temp: 100.0,
            cooling_rate: 0.95,
            min_temp: 0.01,
            max_steps: 1000,
        }
    }
}

impl SaOptions {
    pub fn new(initial_temp: f64, cooling_rate: f64, min_temp: f64, max_steps: usize) -> Self {
        Self {
            initial_temp,
            cooling_rate,
            min_temp,
            max_steps,
        }
    }

    pub fn builder() -> SaOptionsBuilder {
        SaOptionsBuilder {
            options: Self::default(),
        }
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `initial_temp` is not positive
    /// - `cooling_rate` is not strictly between 0 and 1
    /// - `min_temp` is negative or not below `initial_temp`
    /// - `max_steps` is 0
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temp.is_finite()
            || !self.cooling_rate.is_finite()
            || !self.min_temp.is_finite()
        {
            return Err(OptimError::InvalidNumericValue(
                "Annealing temperatures and cooling rate must be finite".to_string(),
            ));
        }
        if self.initial_temp <= 0.0 {
            return Err(OptimError::Configuration(
                "Initial temperature must be positive".to_string(),
            ));
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(OptimError::Configuration(
                "Cooling rate must be strictly between 0.0 and 1.0".to_string(),
            ));
        }
        if self.min_temp < 0.0 {
            return Err(OptimError::Configuration(
                "Minimum temperature cannot be negative".to_string(),
            ));
        }
        if self.min_temp >= self.initial_temp {
            return Err(OptimError::Configuration(format!(
                "Minimum temperature {} must be below the initial temperature {}",
                self.min_temp, self.initial_temp
            )));
        }
        if self.max_steps == 0 {
            return Err(OptimError::Configuration(
                "Maximum steps must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for `SaOptions`, starting from the defaults.
#[derive(Debug, Clone)]
pub struct SaOptionsBuilder {
    options: SaOptions,
}

impl SaOptionsBuilder {
    pub fn initial_temp(mut self, value: f64) -> Self {
        self.options.initial_temp = value;
        self
    }

    pub fn cooling_rate(mut self, value: f64) -> Self {
        self.options.cooling_rate = value;
        self
    }

    pub fn min_temp(mut self, value: f64) -> Self {
        self.options.min_temp = value;
        self
    }

    pub fn max_steps(mut self, value: usize) -> Self {
        self.options.max_steps = value;
        self
    }

    pub fn build(self) -> SaOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SaOptions::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_options() {
        let cases = [
            SaOptions::new(0.0, 0.95, 0.01, 10),
            SaOptions::new(-5.0, 0.95, 0.01, 10),
            SaOptions::new(100.0, 0.0, 0.01, 10),
            SaOptions::new(100.0, 1.0, 0.01, 10),
            SaOptions::new(100.0, -0.5, 0.01, 10),
            SaOptions::new(100.0, 0.95, -1.0, 10),
            SaOptions::new(1.0, 0.95, 1.0, 10),
            SaOptions::new(100.0, 0.95, 0.01, 0),
        ];
        for options in cases {
            assert!(
                matches!(options.validate(), Err(OptimError::Configuration(_))),
                "{:?} should be rejected",
                options
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let options = SaOptions::new(f64::INFINITY, 0.95, 0.01, 10);
        assert!(matches!(
            options.validate(),
            Err(OptimError::InvalidNumericValue(_))
        ));
    }
}
