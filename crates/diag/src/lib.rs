pub mod report;
mod snippet;
pub mod source;

pub use report::{EmitError, Report};
pub use source::Source;
