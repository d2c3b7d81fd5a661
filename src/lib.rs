pub mod config;
pub mod correct;
pub mod error;
pub mod export;
pub mod plot;
pub mod points;
pub mod proj;
pub mod prompt;
pub mod run;
pub mod source;

pub use correct::{ClosureReport, CorrectionModel};
pub use error::TraverseError;
pub use points::PointSequence;
pub use run::{run, RunSummary};
