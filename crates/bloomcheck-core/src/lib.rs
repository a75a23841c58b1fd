//! bloomcheck-core: Bloom's taxonomy cognitive-level classifier.
//!
//! This crate defines the level model, the built-in level profile registry,
//! the deterministic scoring pipeline, and the question-set batch tooling
//! that the `bloomcheck` CLI builds on.

pub mod batch;
pub mod calibrate;
pub mod classifier;
pub mod config;
pub mod error;
pub mod explain;
pub mod level;
pub mod normalize;
pub mod profile;
pub mod question_set;
pub mod rules;
pub mod scoreboard;
pub mod signals;

pub use classifier::{classify, ActualLevel, ClassificationResult, Classifier};
pub use error::ClassifyError;
pub use level::CognitiveLevel;
