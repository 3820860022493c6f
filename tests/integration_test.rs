use std::fs;
use std::path::PathBuf;

use tg_stats::analyzer::{AnalyzerOptions, ChatAnalyzer};
use tg_stats::error::Error;
use tg_stats::wordcloud::{OUTPUT_FILE_NAME, RenderWordCloud, SvgWordCloud};
use tg_stats::parse_export_str;

const EXPORT_EXAMPLE: &str = r#"{
  "chats": {
    "list": [
      {
        "name": "Sib",
        "messages": [
          {"id": 1, "from": "Ali", "date": "2021-04-09T12:01:33", "text": "Are you coming?"},
          {"id": 2, "from": "Sara", "date": "2021-04-09T12:02:10", "reply_to_message_id": 1, "text": "Yes"},
          {"id": 3, "from": "Ali", "date": "2021-04-09T12:03:00", "text": "میای؟"},
          {"id": 4, "from": "Sara", "date": "2021-04-09T12:03:30", "reply_to_message_id": 3, "text": "آره"},
          {"id": 5, "from": "Reza", "date": "2021-04-09T12:04:00", "reply_to_message_id": 99, "text": "replying to nothing"},
          {"id": 6, "from": "Reza", "date": "2021-04-09T12:05:00", "text": ["check ", {"type": "link", "text": "this link?"}]},
          {"id": 7, "from": "Sara", "date": "2021-04-09T12:06:00", "reply_to_message_id": 6, "text": "ok"},
          {"id": 8, "from": "Ali", "date": "2021-04-09T12:07:00", "text": "the trees are green"}
        ]
      },
      {"name": "Other", "messages": []}
    ]
  }
}"#;

const STOPWORDS_EXAMPLE: &str = "you\nthe\nare\n";

fn write_fixtures(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    let export = dir.path().join("result.json");
    let stopwords = dir.path().join("stopwords.txt");
    fs::write(&export, EXPORT_EXAMPLE).unwrap();
    fs::write(&stopwords, STOPWORDS_EXAMPLE).unwrap();
    (export, stopwords)
}

fn load_analyzer(dir: &tempfile::TempDir, chat_index: usize) -> ChatAnalyzer {
    let (export, stopwords) = write_fixtures(dir);
    ChatAnalyzer::from_files(export, stopwords, AnalyzerOptions { chat_index }).unwrap()
}

#[test]
fn test_parse_export_str_counts_chats() {
    let export = parse_export_str(EXPORT_EXAMPLE).unwrap();
    assert_eq!(export.chats.list.len(), 2);
    assert_eq!(export.chats.list[0].messages.len(), 8);
}

#[test]
fn test_load_and_rank_responders() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = load_analyzer(&dir, 0);

    assert_eq!(analyzer.chat().name.as_deref(), Some("Sib"));
    // Sara replied to all three questions; Reza's reply points at an id that
    // is not in the export and counts for nothing.
    let ranking = analyzer.top_responders_default().unwrap();
    assert_eq!(ranking, vec![("Sara".to_string(), 3)]);
}

#[test]
fn test_detect_questions_over_loaded_export() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = load_analyzer(&dir, 0);

    let questions = analyzer.detect_questions();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions.get(&1), Some(&true)); // ASCII question mark
    assert_eq!(questions.get(&3), Some(&true)); // Arabic question mark
    assert_eq!(questions.get(&6), Some(&true)); // question inside a rich segment
    assert!(!questions.contains_key(&8));
}

#[test]
fn test_corpus_filters_stop_words_and_skips_segments() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = load_analyzer(&dir, 0);

    let corpus = analyzer.word_cloud_corpus();
    assert!(
        !corpus
            .split_whitespace()
            .any(|t| t == "you" || t == "the" || t == "are")
    );
    // Message 6 is segmented and contributes nothing on this path.
    assert!(!corpus.contains("link"));
    // Messages are appended without a separator.
    assert!(corpus.contains("comingYes"));
    assert!(corpus.contains("replying to nothing"));
    assert!(corpus.contains("trees green"));
}

#[test]
fn test_analyses_repeat_identically() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = load_analyzer(&dir, 0);

    assert_eq!(analyzer.detect_questions(), analyzer.detect_questions());
    assert_eq!(
        analyzer.top_responders(3).unwrap(),
        analyzer.top_responders(3).unwrap()
    );
    assert_eq!(analyzer.word_cloud_corpus(), analyzer.word_cloud_corpus());
}

#[test]
fn test_empty_chat_analyses() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = load_analyzer(&dir, 1);

    assert!(analyzer.detect_questions().is_empty());
    assert!(analyzer.top_responders_default().unwrap().is_empty());
    assert_eq!(analyzer.word_cloud_corpus(), "");
}

#[test]
fn test_missing_export_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stopwords) = write_fixtures(&dir);

    let err = ChatAnalyzer::from_files(
        dir.path().join("nope.json"),
        stopwords,
        AnalyzerOptions::default(),
    );
    assert!(matches!(err, Err(Error::Io { .. })));
}

#[test]
fn test_malformed_export_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let (export, stopwords) = write_fixtures(&dir);
    fs::write(&export, "{ not json").unwrap();

    let err = ChatAnalyzer::from_files(export, stopwords, AnalyzerOptions::default());
    assert!(matches!(err, Err(Error::Parse { .. })));
}

#[test]
fn test_chat_index_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let (export, stopwords) = write_fixtures(&dir);

    match ChatAnalyzer::from_files(export, stopwords, AnalyzerOptions { chat_index: 5 }) {
        Err(Error::ChatIndex { index, available }) => {
            assert_eq!(index, 5);
            assert_eq!(available, 2);
        }
        Err(other) => panic!("expected chat index error, got {other}"),
        Ok(_) => panic!("expected chat index error"),
    }
}

#[test]
fn test_corpus_to_rendered_cloud() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = load_analyzer(&dir, 0);

    let out_dir = tempfile::tempdir().unwrap();
    let corpus = analyzer.word_cloud_corpus();
    let path = SvgWordCloud::default()
        .render(&corpus, out_dir.path())
        .unwrap();

    assert_eq!(path, out_dir.path().join(OUTPUT_FILE_NAME));
    let svg = fs::read_to_string(path).unwrap();
    assert!(svg.contains(">trees</text>"));
}
