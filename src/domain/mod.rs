pub mod error;
pub mod model;

pub use error::{ConfigError, DownloadError, FilenameError};
pub use model::{DownloadOutcome, DownloadRequest, PreviewOutcome};
