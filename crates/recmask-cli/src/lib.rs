//! Batch front end for `recmask-core`: CSV in, redacted CSV out.

pub mod batch;
pub mod error;

pub use batch::{process, process_file, BatchSummary, OUTPUT_FILE};
pub use error::{BatchError, Result};
