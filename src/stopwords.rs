use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;
use crate::text::Normalize;

/// Stop words loaded from a plain-text resource, one word per line.
///
/// Each line is trimmed of trailing whitespace and run through the normalizer
/// before insertion, so lookups match however the source file spelled a word.
#[derive(Debug, Default, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_path<P: AsRef<Path>>(path: P, normalizer: &impl Normalize) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut words = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| Error::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let word = line.trim_end();
            if word.is_empty() {
                continue;
            }
            words.insert(normalizer.normalize(word));
        }

        Ok(Self { words })
    }

    /// Builds a set directly from words, normalizing each one.
    pub fn from_words<I, S>(words: I, normalizer: &impl Normalize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| normalizer.normalize(w.as_ref()))
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
