//! Titanic survival predictor
//!
//! Turns a passenger record into the feature vector a pre-trained
//! logistic-regression classifier expects, and evaluates that classifier.
//!
//! - Passenger fields and their encoding (passenger module)
//! - Model file loading and inference (model module)

pub mod model;
pub mod passenger;

pub use model::{LogisticModel, Prediction, FEATURE_COUNT};
pub use passenger::{Passenger, Port, Sex};
