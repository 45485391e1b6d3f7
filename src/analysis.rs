//! Text analysis: normalization, shape matching and syllable segmentation.
//!
//! Text flows through the modules in this order:
//! [`normalizer`] → [`crate::alphabet::Alphabet::encode`] → [`shape`] →
//! [`segmenter`].

pub mod normalizer;
pub mod segmenter;
pub mod shape;

// Re-export commonly used types
pub use segmenter::{END_OF_WORD, Fragment, SegmentedWord, Segmenter, WordToken};
pub use shape::{SHAPE_PRIORITY, Shape, ShapeMatch, Trigger};
