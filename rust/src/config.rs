//! Run configuration: which sizes to measure, how often, and how strictly

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::fixture::Fixture;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const STANDARD_ITERATIONS: u64 = 100_000;
pub const STANDARD_SIZES: [usize; 5] = [2, 4, 8, 16, 32];

/// One measured configuration
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConfig {
    pub longs: usize,
    pub doubles: usize,
    pub iterations: u64,
}

impl SizeConfig {
    pub fn new(longs: usize, doubles: usize, iterations: u64) -> Self {
        Self {
            longs,
            doubles,
            iterations,
        }
    }

    #[inline]
    pub fn fixture(&self) -> Fixture {
        Fixture::new(self.longs, self.doubles)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub configurations: Vec<SizeConfig>,
    /// Absolute tolerance for the grand-total check
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RunConfig {
    /// Sizes 2, 4, 8, 16, 32 with matching integer/float counts,
    /// 100000 iterations each
    pub fn standard() -> Self {
        Self {
            configurations: STANDARD_SIZES
                .iter()
                .map(|&n| SizeConfig::new(n, n, STANDARD_ITERATIONS))
                .collect(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(BenchError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        for (i, c) in self.configurations.iter().enumerate() {
            if c.iterations == 0 {
                return Err(BenchError::InvalidConfig(format!(
                    "configuration {} ({}/{}) has zero iterations",
                    i, c.longs, c.doubles
                )));
            }
            c.fixture().capacity_bytes()?;
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
