//! Score conversion engine for standardized tests: raw responses to scaled
//! scores, bands, percentiles and feedback.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod programs;
pub mod report;

pub use error::{ConfigError, ScoreError, ValidationError, ValidationIssue};
pub use model::program::{ProgramConfig, ProgramKind};
pub use model::responses::{RawResponseSet, ResponseMap};
pub use model::results::CompositeResult;
pub use pipeline::compute;
