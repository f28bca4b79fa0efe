pub mod batch;

pub use batch::{run_convert, BatchDriver, BatchReport, JobFailure, JobOutput};
