//! Model evaluation: streaming error/entropy rates and confusion scores.

pub mod scores;
pub mod streaming;

pub use scores::ConfusionMatrix;
pub use streaming::{entropy_loss, is_misclassified, RunningStats};
