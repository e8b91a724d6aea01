//! `minir` CLI: index a directory of text files, then search or autocomplete.

use clap::{Parser, Subcommand};
use minir::corpus::{self, Corpus, ReadPolicy};
use minir::request::{Request, AUTOCOMPLETE_MARKER};
use minir::{tfidf, DocId, Index, IndexBuilder, IndexConfig, Stopwords};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATASET: &str = "dataset";
const DEFAULT_STOPWORDS: &str = "stopwords.txt";
const DEFAULT_TOP_K: usize = 5;
const RULE: &str = "--------------------------------";

#[derive(Parser, Debug)]
#[command(author, version, about = "TF-IDF search and autocomplete over a directory of text files", long_about = None)]
struct Args {
    /// Defaults to `repl`.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Debug, Clone)]
struct CorpusArgs {
    /// Document directory (walked recursively, one document per file).
    #[arg(long, default_value = DEFAULT_DATASET)]
    dataset: PathBuf,

    /// Whitespace-separated stopword list. A missing file means no stopwords.
    #[arg(long, default_value = DEFAULT_STOPWORDS)]
    stopwords: PathBuf,

    /// Skip unreadable documents instead of aborting.
    #[arg(long, default_value_t = false)]
    skip_unreadable: bool,

    /// Allow autocomplete to suggest tokens containing digits.
    #[arg(long, default_value_t = false)]
    alphanumeric_prefixes: bool,
}

impl Default for CorpusArgs {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            stopwords: PathBuf::from(DEFAULT_STOPWORDS),
            skip_unreadable: false,
            alphanumeric_prefixes: false,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Index the corpus, then read queries from stdin.
    ///
    /// `auto:<prefix>` asks for suggestions, `exit` (or end of input) quits, anything
    /// else is searched.
    Repl {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Hits shown per query.
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,
    },

    /// Index the corpus and run one search.
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Top-k results to return.
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,

        /// Print results as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Query words.
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Index the corpus and print autocomplete suggestions for a prefix.
    Suggest {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Print suggestions as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Literal prefix (lowercase letters; not normalized).
        prefix: String,
    },

    /// Index the corpus and print index statistics.
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Debug, serde::Serialize)]
struct Hit<'a> {
    rank: usize,
    doc_id: DocId,
    score: f64,
    path: std::borrow::Cow<'a, str>,
}

struct Loaded {
    index: Index,
    corpus: Corpus,
    elapsed: Duration,
}

impl Loaded {
    fn hits(&self, ranked: &[(DocId, f64)]) -> Vec<Hit<'_>> {
        ranked
            .iter()
            .enumerate()
            .map(|(i, &(doc_id, score))| Hit {
                rank: i + 1,
                doc_id,
                score,
                path: self
                    .corpus
                    .path(doc_id)
                    .map(|p| p.to_string_lossy())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

fn load(args: &CorpusArgs) -> Result<Loaded, minir::Error> {
    let stopwords = Stopwords::load(&args.stopwords);
    let config = if args.alphanumeric_prefixes {
        IndexConfig::alphanumeric()
    } else {
        IndexConfig::default()
    };
    let policy = if args.skip_unreadable {
        ReadPolicy::Skip
    } else {
        ReadPolicy::Abort
    };

    let start = Instant::now();
    let mut builder = IndexBuilder::with_config(stopwords, config);
    let corpus = corpus::ingest_dir(&args.dataset, &mut builder, policy)?;
    let index = builder.finish();
    Ok(Loaded {
        index,
        corpus,
        elapsed: start.elapsed(),
    })
}

fn print_hits(hits: &[Hit<'_>]) {
    for hit in hits {
        println!(
            "Rank {} | Score: {:.4} | File: {}",
            hit.rank, hit.score, hit.path
        );
    }
}

fn repl(loaded: &Loaded, k: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Indexing complete. Total Docs: {}",
        loaded.index.num_docs()
    );
    println!(
        "Time taken to index: {:.4} seconds",
        loaded.elapsed.as_secs_f64()
    );
    println!(
        "Approximate Index Memory Usage: {} MB\n",
        loaded.index.approx_memory_bytes() / (1024 * 1024)
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter query (or type '{AUTOCOMPLETE_MARKER}pref' for suggestions): ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        match Request::parse(&line) {
            Request::Exit => break,
            Request::Autocomplete(prefix) => {
                let suggestions = loaded.index.autocomplete(prefix);
                println!("Suggestions: {}", suggestions.join(", "));
            }
            Request::Search(query) => {
                let start = Instant::now();
                let ranked = tfidf::rank(&loaded.index, query);
                let took = start.elapsed();
                println!(
                    "Found {} results in {:.6}s",
                    ranked.len(),
                    took.as_secs_f64()
                );
                let shown = &ranked[..ranked.len().min(k)];
                print_hits(&loaded.hits(shown));
            }
        }
        println!("{RULE}");
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("minir=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Repl {
        corpus: CorpusArgs::default(),
        k: DEFAULT_TOP_K,
    });

    match command {
        Commands::Repl { corpus, k } => {
            println!("Loading and Indexing...");
            let loaded = load(&corpus)?;
            repl(&loaded, k)?;
        }
        Commands::Search {
            corpus,
            k,
            json,
            query,
        } => {
            let loaded = load(&corpus)?;
            let query = query.join(" ");
            let ranked = tfidf::retrieve(&loaded.index, &query, k);
            let hits = loaded.hits(&ranked);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                println!("Results for {query:?}:");
                print_hits(&hits);
            }
        }
        Commands::Suggest {
            corpus,
            json,
            prefix,
        } => {
            let loaded = load(&corpus)?;
            let suggestions = loaded.index.autocomplete(&prefix);
            if json {
                println!("{}", serde_json::to_string(&suggestions)?);
            } else {
                for s in suggestions {
                    println!("{s}");
                }
            }
        }
        Commands::Stats { corpus } => {
            let loaded = load(&corpus)?;
            let index = &loaded.index;
            println!("documents: {}", index.num_docs());
            println!("terms: {}", index.num_terms());
            println!("autocomplete words: {}", index.prefixes().len());
            println!("stopwords: {}", index.stopwords().len());
            println!("approx memory: {} bytes", index.approx_memory_bytes());
            println!("index time: {:.4}s", loaded.elapsed.as_secs_f64());
        }
    }

    Ok(())
}
