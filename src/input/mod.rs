pub mod access_log;
pub mod upload;

pub use access_log::{parse, parse_file, parse_line};
pub use upload::{stage_upload, UploadError};
