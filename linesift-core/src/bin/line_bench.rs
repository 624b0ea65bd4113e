//! Pipeline benchmarking tool.
//!
//! Measures the text processing pipeline on a real text file:
//!
//! 1. **Tokenize**: normalization + line tokenization throughput
//! 2. **Index**: full chunked index construction
//! 3. **Search**: query evaluation against the built index
//!
//! ```bash
//! ./target/release/line_bench /path/to/corpus.txt "some query here"
//! ```
//!
//! Run with `--release` and a large input (100MB+) for stable numbers.

use std::env;
use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use linesift_core::analyzer::normalizer::NormalizerConfig;
use linesift_core::analyzer::tokenizer::LineTokenizer;
use linesift_core::dataset::Dataset;
use linesift_core::index::{search, IndexBuilder};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: line_bench <path> [query]");
        std::process::exit(1);
    }

    let path = &args[1];
    let query = args.get(2).map(String::as_str).unwrap_or("the quick brown fox");

    println!("Loading file...");
    let text = fs::read_to_string(path)?;
    println!("File size: {}\n", fmt_bytes(text.len() as u64));

    let dataset = Arc::new(Dataset::from_text(text));
    println!("Lines:     {}\n", dataset.len());

    bench_tokenize(&dataset);
    let index = bench_index(&dataset);
    bench_search(&index, &dataset, query);

    Ok(())
}

fn bench_tokenize(dataset: &Arc<Dataset>) {
    let mut tokenizer = LineTokenizer::new(NormalizerConfig::default());
    let mut tokens = 0u64;

    println!("=== Tokenize ===");

    warmup(|| {
        for line in dataset.iter() {
            tokenizer.tokenize(line, |_| {});
        }
    });

    let elapsed = measure(|| {
        tokens = 0;
        for line in dataset.iter() {
            tokenizer.tokenize(line, |_| tokens += 1);
        }
    });

    print_perf("Tokenize", dataset.text_bytes(), elapsed, tokens);
}

fn bench_index(dataset: &Arc<Dataset>) -> linesift_core::LineIndex {
    println!("=== Index ===");

    warmup(|| {
        let _ = IndexBuilder::new(dataset.clone(), false, 0).run();
    });

    let elapsed = measure(|| {
        let _ = IndexBuilder::new(dataset.clone(), false, 0).run();
    });

    let index = IndexBuilder::new(dataset.clone(), false, 0).run();
    print_perf(
        "Index",
        dataset.text_bytes(),
        elapsed,
        index.total_postings() as u64,
    );
    println!("Stats       : {}\n", index.stats());
    index
}

fn bench_search(index: &linesift_core::LineIndex, dataset: &Arc<Dataset>, query: &str) {
    println!("=== Search ===");
    println!("Query       : {query:?}");

    warmup(|| {
        let _ = search(index, dataset, query, 10);
    });

    let mut hits = 0u64;
    let elapsed = measure(|| {
        hits = search(index, dataset, query, 10).len() as u64;
    });

    println!("Elapsed     : {:.6} s", elapsed.as_secs_f64());
    println!("Hits        : {hits}\n");
}

fn warmup(mut f: impl FnMut()) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure(mut f: impl FnMut()) -> Duration {
    let start = Instant::now();
    for _ in 0..MEASURE_RUNS {
        f();
    }
    start.elapsed() / MEASURE_RUNS as u32
}

fn print_perf(mode: &str, bytes: usize, elapsed: Duration, tokens: u64) {
    let secs = elapsed.as_secs_f64();
    let gib = bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {mode}");
    println!("Elapsed     : {secs:.3} s");
    println!("Throughput  : {:.2} GiB/s", gib / secs.max(1e-9));
    if tokens > 0 {
        println!("Tokens      : {tokens}");
        println!("Tokens/sec  : {:.0}", tokens as f64 / secs.max(1e-9));
    }
    println!("--------------------------------\n");
}

fn fmt_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
