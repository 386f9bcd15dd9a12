use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::passenger::Passenger;

/// Number of inputs the classifier was trained on.
pub const FEATURE_COUNT: usize = 7;

/// A fitted binary logistic-regression classifier.
///
/// Stored on disk as JSON:
///
/// ```json
/// { "coefficients": [-0.9, -2.6, -0.03, -0.3, -0.1, 0.002, -0.2], "intercept": 4.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub survived: bool,
    /// Probability of the "survived" class, in [0, 1]
    pub probability: f64,
}

impl LogisticModel {
    pub fn load(path: &Path) -> Result<Self> {
        ensure!(path.is_file(), "model file {} does not exist", path.display());

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?;
        let model = Self::from_json(&json)
            .with_context(|| format!("Malformed model file {}", path.display()))?;

        info!("Loaded model from {}", path.display());
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: LogisticModel = serde_json::from_str(json).context("Failed to parse model JSON")?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.coefficients.len() == FEATURE_COUNT,
            "model has {} coefficients, expected {}",
            self.coefficients.len(),
            FEATURE_COUNT
        );
        ensure!(
            self.intercept.is_finite() && self.coefficients.iter().all(|w| w.is_finite()),
            "model weights must be finite"
        );
        Ok(())
    }

    /// Signed distance from the decision boundary; positive means "survived".
    pub fn decision(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.intercept + self.coefficients.iter().zip(features).map(|(w, x)| w * x).sum::<f64>()
    }

    pub fn predict(&self, passenger: &Passenger) -> Prediction {
        let features = passenger.features();
        let z = self.decision(&features);
        debug!("features {:?} -> decision {}", features, z);

        Prediction { survived: z > 0.0, probability: sigmoid(z) }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
