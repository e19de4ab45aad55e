pub mod finding;
pub mod record;

pub use finding::{AnomalyFinding, FindingKind};
pub use record::LogRecord;
