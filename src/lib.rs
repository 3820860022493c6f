
pub mod analyzer;
pub mod error;
pub mod models;
pub mod stopwords;
pub mod text;
pub mod wordcloud;

pub use crate::analyzer::{AnalyzerOptions, ChatAnalyzer};
pub use crate::error::Error;
pub use crate::models::ChatExport;

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

/// Parses an in-memory export document.
pub fn parse_export_str(s: &str) -> Result<ChatExport, serde_json::Error> {
    serde_json::from_str(s)
}

/// Loads a Telegram export by memory-mapping the file and parsing the mapped
/// bytes directly, without copying its contents into an intermediate `String`.
///
/// This keeps peak memory low (the OS brings pages in on demand) and can be
/// noticeably faster on very large exports.
pub fn load_export<P: AsRef<Path>>(path: P) -> Result<ChatExport, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_slice(&mmap).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
