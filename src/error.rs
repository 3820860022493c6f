use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by loading and analysis. All of them are fatal for the
/// running operation; there are no retry semantics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid chat export: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("chat index {index} out of range, export contains {available} chats")]
    ChatIndex { index: usize, available: usize },

    #[error("top_n must be a positive integer")]
    InvalidTopN,
}
