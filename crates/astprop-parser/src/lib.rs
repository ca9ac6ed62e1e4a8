//! astprop parser: `key: value` annotation lines and property test files.

mod annotation;
mod test_file;

pub use annotation::{parse_pairs, AnnotationPair};
pub use test_file::{TestFile, TestFileFormat};
