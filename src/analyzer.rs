use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use crate::error::Error;
use crate::models::{Chat, MessageText, TextSegment};
use crate::stopwords::StopwordSet;
use crate::text::{
    Normalize, PersianNormalizer, SentenceSplitter, SplitSentences, Tokenize, WordTokenizer,
};

/// Options for building a [`ChatAnalyzer`] from an export file.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Position of the chat to analyze within the export's chat list.
    pub chat_index: usize,
}

/// Computes descriptive statistics over one chat of a Telegram export.
///
/// The transcript and the stop-word set are loaded once at construction and
/// never mutated; every analysis method recomputes its result from them, so
/// repeated calls are independent and yield identical output.
pub struct ChatAnalyzer<N = PersianNormalizer, T = WordTokenizer, S = SentenceSplitter> {
    chat: Chat,
    stop_words: StopwordSet,
    tokenizer: T,
    splitter: S,
    normalizer: N,
}

impl ChatAnalyzer {
    /// Loads an export and a stop-word file and builds an analyzer over the
    /// chat at `options.chat_index`, with the default Persian text pipeline.
    pub fn from_files<P, Q>(
        chat_json: P,
        stopwords: Q,
        options: AnalyzerOptions,
    ) -> Result<Self, Error>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let chat_json = chat_json.as_ref();
        let stopwords = stopwords.as_ref();

        info!("loading chat export from {}", chat_json.display());
        let export = crate::load_export(chat_json)?;

        let available = export.chats.list.len();
        let mut list = export.chats.list;
        if options.chat_index >= available {
            return Err(Error::ChatIndex {
                index: options.chat_index,
                available,
            });
        }
        let chat = list.swap_remove(options.chat_index);
        debug!(
            "selected chat {:?} with {} messages",
            chat.name,
            chat.messages.len()
        );

        info!("loading stop words from {}", stopwords.display());
        let normalizer = PersianNormalizer::default();
        let stop_words = StopwordSet::from_path(stopwords, &normalizer)?;
        debug!("loaded {} stop words", stop_words.len());

        Ok(Self::with_pipeline(
            chat,
            stop_words,
            normalizer,
            WordTokenizer,
            SentenceSplitter,
        ))
    }
}

impl<N, T, S> ChatAnalyzer<N, T, S>
where
    N: Normalize,
    T: Tokenize,
    S: SplitSentences,
{
    /// Builds an analyzer over an already-loaded chat with a custom text
    /// pipeline. This is the seam tests use to stub out the NLP components.
    pub fn with_pipeline(
        chat: Chat,
        stop_words: StopwordSet,
        normalizer: N,
        tokenizer: T,
        splitter: S,
    ) -> Self {
        Self {
            chat,
            stop_words,
            tokenizer,
            splitter,
            normalizer,
        }
    }

    pub fn chat(&self) -> &Chat {
        &self.chat
    }

    pub fn stop_words(&self) -> &StopwordSet {
        &self.stop_words
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    /// Flags every message whose text contains a question. A message is a
    /// question if any of its sentences contains `?` or the Arabic question
    /// mark `؟`; the first matching sentence decides. Segmented messages are
    /// reconstructed before inspection. Non-questions are absent from the map.
    ///
    /// The mapping is rebuilt on every call; nothing is cached on the analyzer.
    pub fn detect_questions(&self) -> HashMap<i64, bool> {
        let mut flags = HashMap::new();
        for msg in &self.chat.messages {
            let text = resolve_text(&msg.text);
            let is_question = self
                .splitter
                .sentences(&text)
                .iter()
                .any(|sentence| sentence.contains(['?', '؟']));
            if is_question {
                flags.insert(msg.id, true);
            }
        }
        flags
    }

    /// Ranks senders by how many of their messages reply to a question.
    ///
    /// A message counts toward its sender only if it carries a reply reference
    /// and the referenced message is flagged by [`detect_questions`]; replies
    /// to ids outside the export count as replies to non-questions. Ties are
    /// broken by first-encountered order. At most `top_n` entries are returned.
    ///
    /// [`detect_questions`]: ChatAnalyzer::detect_questions
    pub fn top_responders(&self, top_n: usize) -> Result<Vec<(String, usize)>, Error> {
        if top_n == 0 {
            return Err(Error::InvalidTopN);
        }

        let questions = self.detect_questions();

        let mut ranked: Vec<(String, usize)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for msg in &self.chat.messages {
            let Some(reply_to) = msg.reply_to_message_id else {
                continue;
            };
            if !questions.get(&reply_to).copied().unwrap_or(false) {
                continue;
            }
            let Some(sender) = msg.sender.as_deref() else {
                continue;
            };
            match slots.get(sender) {
                Some(&slot) => ranked[slot].1 += 1,
                None => {
                    slots.insert(sender, ranked.len());
                    ranked.push((sender.to_string(), 1));
                }
            }
        }

        // Stable sort keeps insertion order within equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);
        Ok(ranked)
    }

    /// Ranks senders with the default cutoff of ten.
    pub fn top_responders_default(&self) -> Result<Vec<(String, usize)>, Error> {
        self.top_responders(DEFAULT_TOP_N)
    }

    /// Builds the stop-word-filtered token stream fed to word-cloud rendering.
    ///
    /// Only messages whose text is a flat string contribute; segmented
    /// messages are skipped on this path (unlike question detection, which
    /// reconstructs them). Tokens are matched against the stop-word set as
    /// tokenized, and each message's surviving tokens are space-joined and
    /// appended with no separator between messages. Both quirks are kept from
    /// the observed behavior of the system this one replaces.
    pub fn word_cloud_corpus(&self) -> String {
        let mut corpus = String::new();
        let mut kept = 0usize;
        for msg in &self.chat.messages {
            let MessageText::Plain(raw) = &msg.text else {
                continue;
            };
            let tokens: Vec<&str> = self
                .tokenizer
                .tokenize(raw)
                .into_iter()
                .filter(|token| !self.stop_words.contains(token))
                .collect();
            kept += tokens.len();
            corpus.push_str(&tokens.join(" "));
        }
        debug!("word cloud corpus holds {kept} tokens");
        corpus
    }
}

/// Default cutoff for [`ChatAnalyzer::top_responders`].
pub const DEFAULT_TOP_N: usize = 10;

/// Concatenates the text of rich-message segments, in order. Plain segments
/// contribute themselves, entity segments their `text` field; entities without
/// one contribute nothing.
pub fn reconstruct_message_text(segments: &[TextSegment]) -> String {
    let mut text = String::new();
    for segment in segments {
        match segment {
            TextSegment::Plain(s) => text.push_str(s),
            TextSegment::Entity(entity) => {
                if let Some(s) = &entity.text {
                    text.push_str(s);
                }
            }
        }
    }
    text
}

/// Resolves a message body to flat text, reconstructing segmented bodies.
fn resolve_text(text: &MessageText) -> Cow<'_, str> {
    match text {
        MessageText::Plain(s) => Cow::Borrowed(s.as_str()),
        MessageText::Segmented(segments) => Cow::Owned(reconstruct_message_text(segments)),
    }
}
