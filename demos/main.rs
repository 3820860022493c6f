use std::env;
use std::path::Path;
use std::process;

use tg_stats::analyzer::{AnalyzerOptions, ChatAnalyzer};
use tg_stats::wordcloud::{RenderWordCloud, SvgWordCloud, WordCloudOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!(
            "Usage: {} <export.json> <stopwords.txt> <output_dir>",
            args[0]
        );
        process::exit(1);
    }

    let analyzer = match ChatAnalyzer::from_files(&args[1], &args[2], AnalyzerOptions::default()) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let chat = analyzer.chat();
    println!("Chat: {}", chat.name.as_deref().unwrap_or("(unnamed)"));
    println!("Messages: {}", chat.messages.len());
    let dates: Vec<_> = chat.messages.iter().filter_map(|m| m.date).collect();
    if let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) {
        println!("Covering {} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"));
    }

    println!("\nTop question responders:");
    for (sender, count) in analyzer.top_responders_default().unwrap() {
        println!("{}: {}", sender, count);
    }

    let corpus = analyzer.word_cloud_corpus();
    let cloud = SvgWordCloud::new(WordCloudOptions::default());
    let path = cloud
        .render(&corpus, Path::new(&args[3]))
        .expect("failed to render word cloud");
    println!("\nWord cloud saved to {}", path.display());
}
