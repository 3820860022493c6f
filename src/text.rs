//! Text-processing capabilities used by the analyzer: word normalization, word
//! tokenization and sentence segmentation.
//!
//! The analyzer only depends on the three traits, so tests (or callers dealing
//! with another language) can plug in their own pipeline. The default
//! implementations target Persian-language chats, where exports mix Persian
//! and Arabic codepoints for the same letters.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Words are runs of letters, digits and ZWNJ (U+200C), the half-space that
    // joins Persian compound words.
    static ref WORD_REGEX: Regex = Regex::new(r"[\p{L}\p{Nd}\u{200C}]+").unwrap();
    // A sentence is a run of non-terminator characters plus the terminator run
    // that follows it. Terminators stay attached so a sentence still contains
    // its own question mark.
    static ref SENTENCE_REGEX: Regex = Regex::new(r"[^.!?؟\n]+[.!?؟]*").unwrap();
}

/// Word normalization.
pub trait Normalize {
    fn normalize(&self, input: &str) -> String;
}

/// Word tokenization. Tokens are slices of the input, in order.
pub trait Tokenize {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Sentence segmentation. Sentences are slices of the input, in order, with
/// their terminating punctuation attached.
pub trait SplitSentences {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy)]
pub struct NormalizerConfig {
    /// Map Arabic codepoints to their Persian equivalents (ي→ی, ك→ک, …) and
    /// drop Arabic diacritics.
    pub unify_arabic: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self { unify_arabic: true }
    }
}

/// Default normalizer for Persian chat text.
///
/// Lowercases (Unicode-aware, for the Latin words that pepper Persian chats),
/// unifies Arabic letter variants into their Persian forms, strips Arabic
/// diacritics, collapses whitespace runs into single spaces and trims the ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct PersianNormalizer {
    config: NormalizerConfig,
}

impl PersianNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }
}

impl Normalize for PersianNormalizer {
    fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut pending_space = false;

        for ch in input.chars() {
            if ch.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }
            let ch = if self.config.unify_arabic {
                match fold_arabic(ch) {
                    Some(folded) => folded,
                    None => continue,
                }
            } else {
                ch
            };
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            for lowered in ch.to_lowercase() {
                out.push(lowered);
            }
        }

        out
    }
}

/// Maps an Arabic codepoint to its Persian form, or `None` for combining marks
/// that normalization removes entirely.
#[inline]
fn fold_arabic(c: char) -> Option<char> {
    // Arabic harakat and Quranic annotation marks.
    if ('\u{064B}'..='\u{065F}').contains(&c) || c == '\u{0670}' {
        return None;
    }

    Some(match c {
        'ي' | 'ى' => 'ی',
        'ك' => 'ک',
        'ة' => 'ه',
        'أ' | 'إ' | 'ٱ' => 'ا',
        'ؤ' => 'و',
        'ئ' => 'ی',
        _ => c,
    })
}

/// Default word tokenizer: a regex scan for letter/digit runs. Punctuation and
/// symbols separate tokens and are never part of one.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl Tokenize for WordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        WORD_REGEX.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Default sentence splitter: segments on `.`, `!`, `?`, `؟` and newlines,
/// keeping the terminator run attached to its sentence.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentenceSplitter;

impl SplitSentences for SentenceSplitter {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        SENTENCE_REGEX
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        PersianNormalizer::default().normalize(input)
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(norm("HELLO"), "hello");
        assert_eq!(norm("HeLlO World"), "hello world");
    }

    #[test]
    fn normalize_unifies_arabic_yeh_and_kaf() {
        assert_eq!(norm("علي"), "علی");
        assert_eq!(norm("كتاب"), "کتاب");
    }

    #[test]
    fn normalize_strips_diacritics() {
        // "سَلام" with fatha over the seen.
        assert_eq!(norm("س\u{064E}لام"), "سلام");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(norm("  hello \t\n world  "), "hello world");
        assert_eq!(norm("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = ["Hello  World", "كتاب علي", "سلام دوست من"];
        let n = PersianNormalizer::default();
        for s in samples {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once);
        }
    }

    #[test]
    fn normalize_without_unification_keeps_arabic_forms() {
        let n = PersianNormalizer::new(NormalizerConfig {
            unify_arabic: false,
        });
        assert_eq!(n.normalize("كتاب"), "كتاب");
    }

    #[test]
    fn tokenize_splits_on_punctuation_and_space() {
        let tokens = WordTokenizer.tokenize("Hey, are you coming?");
        assert_eq!(tokens, vec!["Hey", "are", "you", "coming"]);
    }

    #[test]
    fn tokenize_keeps_zwnj_compounds_together() {
        let tokens = WordTokenizer.tokenize("می\u{200C}روم خانه");
        assert_eq!(tokens, vec!["می\u{200C}روم", "خانه"]);
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(WordTokenizer.tokenize("").is_empty());
        assert!(WordTokenizer.tokenize("?!.,").is_empty());
    }

    #[test]
    fn sentences_keep_terminators() {
        let sentences = SentenceSplitter.sentences("Are you coming? Yes. Great!");
        assert_eq!(sentences, vec!["Are you coming?", "Yes.", "Great!"]);
    }

    #[test]
    fn sentences_split_on_newlines() {
        let sentences = SentenceSplitter.sentences("first line\nsecond line");
        assert_eq!(sentences, vec!["first line", "second line"]);
    }

    #[test]
    fn sentences_keep_arabic_question_mark() {
        let sentences = SentenceSplitter.sentences("میای؟ آره");
        assert_eq!(sentences, vec!["میای؟", "آره"]);
    }

    #[test]
    fn sentences_empty_input() {
        assert!(SentenceSplitter.sentences("").is_empty());
        assert!(SentenceSplitter.sentences("...").is_empty());
    }
}
