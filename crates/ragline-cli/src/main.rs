//! ragline CLI - chunk documents and query them end to end.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ragline_chunk::GreedyChunker;
use ragline_core::{
    ChunkPayload, Embedder, Generator, IndexPoint, ProviderCell, RaglineConfig, VectorIndex,
};
use ragline_prompt::PromptAssembler;
use ragline_providers::{resolve_generator, HashEmbedder, HeuristicTokenCounter, InMemoryIndex};
use ragline_retrieve::RetrievalEngine;

/// Process-lifetime provider handles, filled on first use.
static EMBEDDER: ProviderCell<HashEmbedder> = ProviderCell::new("embedder");
static GENERATOR: ProviderCell<dyn Generator> = ProviderCell::new("generator");

/// ragline - retrieval reranking and prompt assembly pipeline
#[derive(Parser)]
#[command(name = "ragline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (default: ~/.config/ragline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a document and print the resulting chunks
    Chunk {
        /// Path to a text or markdown file
        path: PathBuf,
    },

    /// Ingest a directory and answer a question from its contents
    Query {
        /// Directory of .txt/.md documents
        dir: PathBuf,

        /// The question to answer
        question: String,

        /// Number of contexts to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Restrict retrieval to a single source file name
        #[arg(long)]
        source_filter: Option<String>,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<&Path>) -> Result<RaglineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(RaglineConfig::load(p)?),
        None => Ok(RaglineConfig::load_default()?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Chunk { path } => {
            chunk_command(&config, &path)?;
        }
        Commands::Query {
            dir,
            question,
            top_k,
            source_filter,
        } => {
            let mut config = config;
            if let Some(k) = top_k {
                config.retrieval.top_k = k;
            }
            query_command(&config, &dir, &question, source_filter.as_deref()).await?;
        }
    }

    Ok(())
}

fn chunk_command(config: &RaglineConfig, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let source = source_name(path);

    let chunker = GreedyChunker::new(config.chunking.clone());
    let chunks = chunker.chunk_document(&text, &source);

    if chunks.is_empty() {
        println!("No chunks produced (document shorter than min_chars?)");
        return Ok(());
    }

    for chunk in &chunks {
        println!("--- chunk {} ({} chars) ---", chunk.chunk_id, chunk.text.chars().count());
        println!("{}\n", chunk.text);
    }
    println!("{} chunk(s) from {}", chunks.len(), source);

    Ok(())
}

async fn query_command(
    config: &RaglineConfig,
    dir: &Path,
    question: &str,
    source_filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_files(dir)?;
    if files.is_empty() {
        println!("No .txt or .md files found at: {}", dir.display());
        return Ok(());
    }

    let index = Arc::new(InMemoryIndex::new());
    let embedder = EMBEDDER
        .get_or_init(|| async { Ok(Arc::new(HashEmbedder::new())) })
        .await?;
    let generator = GENERATOR
        .get_or_init(|| async { resolve_generator(&config.generator) })
        .await?;

    let chunk_count = ingest(
        index.as_ref(),
        embedder.as_ref(),
        &GreedyChunker::new(config.chunking.clone()),
        config.embedding.batch_size,
        &files,
    )
    .await?;
    println!("Ingested {} chunk(s) from {} file(s)", chunk_count, files.len());
    for (source, count) in index.sources() {
        println!("  {}: {} chunk(s)", source, count);
    }

    let engine = RetrievalEngine::new(index, embedder, config.retrieval.clone());
    let contexts = engine.retrieve(question, source_filter).await?;

    if contexts.is_empty() {
        println!("No relevant context found.");
        return Ok(());
    }

    let assembler = PromptAssembler::new(config.prompt.clone());
    let prompt = assembler.assemble_default(question, &contexts, &HeuristicTokenCounter);

    println!("\nContexts:");
    for (block, context) in prompt.blocks.iter().zip(&contexts) {
        let payload = &context.payload;
        print!(
            "  [{}] {} (chunk {}, score {:.3}",
            block.index, payload.source, payload.chunk_id, context.score
        );
        if let Some(title) = &payload.title {
            print!(", title: {}", title);
        }
        if let Some(page) = payload.page {
            print!(", page: {}", page);
        }
        println!(")");
    }

    let answer = generator.generate(&prompt.messages).await?;
    println!("\n{}", answer);

    Ok(())
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if dir.is_file() {
        if is_supported_file(dir) {
            files.push(dir.to_path_buf());
        }
        return Ok(files);
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_supported_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_supported_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext, "txt" | "md")
}

/// Chunk and embed each file, then upsert the points in batches.
async fn ingest(
    index: &dyn VectorIndex,
    embedder: &dyn Embedder,
    chunker: &GreedyChunker,
    batch_size: usize,
    files: &[PathBuf],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut chunks: Vec<ChunkPayload> = Vec::new();

    for path in files {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("  Error reading {}: {}", path.display(), e);
                continue;
            }
        };
        let source = source_name(path);
        let mut file_chunks = chunker.chunk_document(&text, &source);
        let title = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);
        for chunk in &mut file_chunks {
            chunk.title = title.clone();
        }
        chunks.extend(file_chunks);
    }

    let batch_size = batch_size.max(1);
    for batch in chunks.chunks(batch_size) {
        let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
        let vectors = embedder.embed_documents(&texts).await?;

        let points: Vec<IndexPoint> = vectors
            .into_iter()
            .zip(batch)
            .map(|(vector, payload)| IndexPoint::new(vector, payload.clone()))
            .collect();
        index.upsert(&points).await?;
    }

    Ok(chunks.len())
}
