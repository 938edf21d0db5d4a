//! Output rendering: the flattened text buffer and where it is written.

pub mod aggregate;
pub mod writer;

pub use aggregate::{ProcessingOutcome, DELIMITER_WIDTH};
pub use writer::{write_output, OutputTarget};
