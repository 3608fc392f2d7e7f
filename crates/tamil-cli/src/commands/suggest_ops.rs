use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use tamil_core::freq::FrequencyOracle;
use tamil_core::settings::settings;
use tamil_core::translit::TableConverter;
use tamil_core::variants::generate_variants;
use tamil_suggest::{
    CacheStatus, GenerationRequest, PipelineResult, SuggestResponse, Suggestion,
};

use super::{build_pipeline, PipelineArgs};

/// One JSONL line written by `batch`.
#[derive(Debug, Serialize)]
struct BatchEntry<'a> {
    text: &'a str,
    suggestions: &'a [Suggestion],
    cache_status: CacheStatus,
}

pub fn format_text(text: &str, result: &PipelineResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{text}: cache={:?} generated_by={:?} used_runner={}",
        result.cache_status, result.generated_by, result.used_runner
    );
    if result.suggestions.is_empty() {
        out.push_str("  (no suggestions)\n");
    }
    for (i, s) in result.suggestions.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}\t{:.2}", i + 1, s.word, s.score);
    }
    out
}

/// Non-empty, non-comment lines, trimmed.
pub fn parse_tokens(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}

pub fn suggest_cmd(
    args: &PipelineArgs,
    text: &str,
    mode: &str,
    limit: usize,
    repeat: usize,
    json: bool,
) {
    let pipeline = die!(build_pipeline(args), "Error: {}");
    let req = GenerationRequest::new(text, mode, limit).with_request_id("cli");

    for _ in 0..repeat.max(1) {
        let result = pipeline.suggest(&req);
        if json {
            let resp = SuggestResponse::from(result);
            println!(
                "{}",
                die!(serde_json::to_string_pretty(&resp), "JSON error: {}")
            );
        } else {
            print!("{}", format_text(text, &result));
        }
    }
}

pub fn batch_cmd(
    args: &PipelineArgs,
    input_file: &str,
    output_file: &str,
    mode: &str,
    limit: usize,
    stats: bool,
) {
    let content = die!(
        fs::read_to_string(input_file),
        "Error reading {input_file}: {}"
    );
    let pipeline = die!(build_pipeline(args), "Error: {}");
    let file = die!(
        fs::File::create(Path::new(output_file)),
        "Error creating {output_file}: {}"
    );
    let mut writer = BufWriter::new(file);

    let tokens = parse_tokens(&content);
    for (i, text) in tokens.iter().copied().enumerate() {
        let req = GenerationRequest::new(text, mode, limit).with_request_id(format!("batch-{i}"));
        let result = pipeline.suggest(&req);
        let entry = BatchEntry {
            text,
            suggestions: &result.suggestions,
            cache_status: result.cache_status,
        };
        let line = die!(serde_json::to_string(&entry), "JSON error: {}");
        die!(writeln!(writer, "{line}"), "Error writing {output_file}: {}");
    }
    die!(writer.flush(), "Error writing {output_file}: {}");
    eprintln!("Wrote {} entries to {output_file}", tokens.len());

    if stats {
        let health = pipeline.health();
        eprintln!(
            "{}",
            die!(serde_json::to_string_pretty(&health), "JSON error: {}")
        );
    }
}

pub fn variants_cmd(token: &str, max: Option<usize>) {
    let max = max.unwrap_or(settings().generation.max_variants);
    let converter = TableConverter::global();
    for variant in generate_variants(&token.to_lowercase(), max) {
        println!("{variant}\t{}", converter.transliterate(&variant));
    }
}

pub fn freq_cmd(file: &str, words: &[String]) {
    let oracle = die!(
        FrequencyOracle::open(Path::new(file)),
        "Error opening {file}: {}"
    );
    println!("{} words, max count {}", oracle.len(), oracle.max_count());
    for word in words {
        let known = if oracle.has_entry(word) { "known" } else { "unknown" };
        println!("{word}\t{:.4}\t{known}", oracle.score(word));
    }
}
