use serde::{Deserialize, Serialize};

/// One parsed access log line.
///
/// Every field is kept as the text that appeared in the log. `status` in
/// particular stays a string so rules can match on its exact spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub ip: String,
    pub timestamp: String,
    pub method: String,
    pub path: String,
    pub protocol: String,
    pub status: String,
    pub size: String,
}
