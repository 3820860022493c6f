//! Word-cloud rendering. The analyzer only produces the corpus string; turning
//! it into an image is this module's job, behind the [`RenderWordCloud`] seam
//! so another backend can be dropped in.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Error;

/// Fixed output file name inside the caller-specified directory.
pub const OUTPUT_FILE_NAME: &str = "wordcloud.svg";

/// Rendering collaborator: corpus string in, image file out.
pub trait RenderWordCloud {
    /// Renders `corpus` into `output_dir` and returns the written file's path.
    fn render(&self, corpus: &str, output_dir: &Path) -> Result<PathBuf, Error>;
}

/// Options for [`SvgWordCloud`].
#[derive(Debug, Clone)]
pub struct WordCloudOptions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Canvas background color, any SVG color value.
    pub background: String,
    /// Font file embedded as an `@font-face` source. Without one the cloud
    /// falls back to the viewer's sans-serif font.
    pub font_path: Option<PathBuf>,
    /// Most frequent words kept in the image.
    pub max_words: usize,
    pub min_font_size: f32,
    pub max_font_size: f32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1200,
            background: "white".to_string(),
            font_path: None,
            max_words: 200,
            min_font_size: 12.0,
            max_font_size: 96.0,
        }
    }
}

/// Default renderer: a deterministic row-layout SVG word cloud. Words are
/// placed most-frequent first, sized proportionally to their frequency.
#[derive(Debug, Default)]
pub struct SvgWordCloud {
    options: WordCloudOptions,
}

impl SvgWordCloud {
    pub fn new(options: WordCloudOptions) -> Self {
        Self { options }
    }

    fn font_size(&self, count: usize, max_count: usize) -> f32 {
        let opts = &self.options;
        if max_count <= 1 {
            return opts.min_font_size;
        }
        // Square-root scaling keeps mid-frequency words legible instead of
        // letting the top word dwarf everything.
        let ratio = (count as f32 / max_count as f32).sqrt();
        opts.min_font_size + (opts.max_font_size - opts.min_font_size) * ratio
    }
}

const MARGIN: f32 = 20.0;
const WORD_GAP: f32 = 14.0;
const ROW_GAP: f32 = 10.0;
// Mean glyph advance relative to the font size, close enough for row packing.
const GLYPH_ASPECT: f32 = 0.6;

const PALETTE: [&str; 6] = [
    "#1f77b4", "#d62728", "#2ca02c", "#9467bd", "#ff7f0e", "#17a2b8",
];

impl RenderWordCloud for SvgWordCloud {
    fn render(&self, corpus: &str, output_dir: &Path) -> Result<PathBuf, Error> {
        let opts = &self.options;
        let frequencies = word_frequencies(corpus);
        let max_count = frequencies.first().map(|(_, n)| *n).unwrap_or(0);
        info!(
            "rendering word cloud from {} distinct words",
            frequencies.len()
        );

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = opts.width,
            h = opts.height,
        );
        if let Some(font) = &opts.font_path {
            let _ = writeln!(
                svg,
                r#"  <style>@font-face {{ font-family: "wordcloud"; src: url("{}"); }}</style>"#,
                escape_xml(&font.display().to_string()),
            );
        }
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&opts.background),
        );

        let font_family = if opts.font_path.is_some() {
            "wordcloud, sans-serif"
        } else {
            "sans-serif"
        };

        let mut x = MARGIN;
        let mut y = MARGIN;
        let mut row_height = 0.0f32;
        for (i, (word, count)) in frequencies.iter().take(opts.max_words).enumerate() {
            let size = self.font_size(*count, max_count);
            let width = size * GLYPH_ASPECT * word.chars().count() as f32;

            if x + width > opts.width as f32 - MARGIN && x > MARGIN {
                x = MARGIN;
                y += row_height + ROW_GAP;
                row_height = 0.0;
            }
            if y + size > opts.height as f32 - MARGIN {
                break;
            }

            let _ = writeln!(
                svg,
                r#"  <text x="{x:.1}" y="{baseline:.1}" font-size="{size:.1}" font-family="{font_family}" fill="{fill}">{word}</text>"#,
                baseline = y + size,
                fill = PALETTE[i % PALETTE.len()],
                word = escape_xml(word),
            );

            x += width + WORD_GAP;
            row_height = row_height.max(size);
        }
        svg.push_str("</svg>\n");

        let out_path = output_dir.join(OUTPUT_FILE_NAME);
        info!("saving word cloud to {}", out_path.display());
        fs::write(&out_path, svg).map_err(|e| Error::Io {
            path: out_path.clone(),
            source: e,
        })?;
        Ok(out_path)
    }
}

/// Counts whitespace-separated words and sorts descending by count. Ties keep
/// first-encountered order.
pub fn word_frequencies(corpus: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slots: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for word in corpus.split_whitespace() {
        match slots.get(word) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(word.to_string(), counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
