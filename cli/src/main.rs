//! rfcsearch CLI - turns the RFC series into indexable passages

mod http;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use rfcsearch::ingest::{read_passages, DirectorySource, Pipeline, PipelineOptions};
use rfcsearch::render::{self, to_json, to_json_lines};
use rfcsearch::{
    parse_catalog_with_options, Catalog, CatalogOptions, CatalogRecord, JsonFormat,
    SectionReconstructor,
};

use http::HttpSource;

const DEFAULT_INDEX_URL: &str = "https://tools.ietf.org/rfc/index";
const DEFAULT_BASE_URL: &str = "https://tools.ietf.org/rfc/";

const CATALOG_FILE: &str = "catalog.json";
const RAW_DIR: &str = "raw";
const PROCESSED_DIR: &str = "processed";

#[derive(Parser)]
#[command(name = "rfcsearch")]
#[command(version)]
#[command(about = "Turn the RFC series into indexable passages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the RFC index page into a JSON catalog
    Catalog {
        /// Read the index page from a file instead of fetching it
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// URL of the online RFC index
        #[arg(long, env = "RFCSEARCH_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
        index_url: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail on the first malformed entry
        #[arg(long)]
        strict: bool,
    },

    /// Download every catalogued document into <OUTDIR>/raw
    Download {
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        outdir: PathBuf,

        /// Existing catalog JSON (the index page is fetched if not given)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// URL of the online RFC index
        #[arg(long, env = "RFCSEARCH_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
        index_url: String,

        /// Base URL for downloading a document in text form
        #[arg(long, env = "RFCSEARCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Reconstruct every downloaded document into <DATA>/processed
    Clean {
        /// Data directory written by `download`
        #[arg(short, long, value_name = "DIR")]
        data: PathBuf,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Convert processed documents into a JSON Lines passage file
    Passages {
        /// Data directory written by `clean`
        #[arg(short, long, value_name = "DIR")]
        data: PathBuf,

        /// Output file (defaults to <DATA>/passages.jsonl)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Reconstruct one document and print it
    Show {
        /// Raw document file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Catalog JSON used to annotate the document
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Print units and statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Catalog {
            input,
            index_url,
            output,
            compact,
            strict,
        }) => cmd_catalog(input.as_deref(), &index_url, output.as_deref(), compact, strict),
        Some(Commands::Download {
            outdir,
            catalog,
            index_url,
            base_url,
        }) => cmd_download(&outdir, catalog.as_deref(), &index_url, &base_url),
        Some(Commands::Clean { data, sequential }) => cmd_clean(&data, sequential),
        Some(Commands::Passages { data, output }) => cmd_passages(&data, output.as_deref()),
        Some(Commands::Show {
            input,
            catalog,
            json,
        }) => cmd_show(&input, catalog.as_deref(), json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: rfcsearch <COMMAND>".yellow());
            println!("       rfcsearch --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read catalog {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&json)?)
}

fn fetch_catalog(
    input: Option<&Path>,
    index_url: &str,
    options: CatalogOptions,
) -> Result<Catalog, Box<dyn std::error::Error>> {
    let page = match input {
        Some(path) => fs::read_to_string(path)?,
        None => HttpSource::new(DEFAULT_BASE_URL)?.fetch_page(index_url)?,
    };
    Ok(parse_catalog_with_options(&page, options)?)
}

fn report_rejected(catalog: &Catalog) {
    if catalog.rejected.is_empty() {
        return;
    }
    eprintln!(
        "{} {} malformed entries skipped",
        "Warning:".yellow().bold(),
        catalog.rejected.len()
    );
    for rejected in catalog.rejected.iter().take(5) {
        eprintln!("  {} {}", "-".dimmed(), rejected.reason);
    }
}

fn cmd_catalog(
    input: Option<&Path>,
    index_url: &str,
    output: Option<&Path>,
    compact: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = CatalogOptions::new();
    if strict {
        options = options.strict();
    }
    let catalog = fetch_catalog(input, index_url, options)?;
    report_rejected(&catalog);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&catalog, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} records to {}",
            "Saved".green(),
            catalog.len(),
            path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_download(
    outdir: &Path,
    catalog: Option<&Path>,
    index_url: &str,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut catalog = match catalog {
        Some(path) => load_catalog(path)?,
        None => {
            println!("{} {}", "Downloading index page from".cyan(), index_url);
            fetch_catalog(None, index_url, CatalogOptions::new())?
        }
    };
    report_rejected(&catalog);

    let raw_dir = outdir.join(RAW_DIR);
    fs::create_dir_all(&raw_dir)?;

    let source = HttpSource::new(base_url)?;
    let pipeline = Pipeline::new();

    let pb = progress_bar(catalog.len());
    let retrieval = pipeline.retrieve_with_progress(&catalog, &source, |record, ok| {
        if !ok {
            pb.println(format!("{}: download failed", record.key()));
        }
        pb.set_message(record.key());
        pb.inc(1);
    });
    pb.finish_with_message("done");

    for doc in &retrieval.documents {
        fs::write(raw_dir.join(format!("{}.txt", doc.record.key())), &doc.bytes)?;
    }

    let removed = catalog.retain_retrieved(&retrieval.failed);
    let catalog_path = outdir.join(CATALOG_FILE);
    fs::write(&catalog_path, to_json(&catalog, JsonFormat::Pretty)?)?;

    println!(
        "\n{} {} documents to {}",
        "Downloaded".green().bold(),
        retrieval.documents.len(),
        raw_dir.display()
    );
    if removed > 0 {
        println!(
            "{} {} failed: {}",
            "Removed".yellow(),
            removed,
            retrieval.failed.join(", ")
        );
    }
    println!("{} {}", "Catalog:".bold(), catalog_path.display());

    Ok(())
}

fn cmd_clean(data: &Path, sequential: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(&data.join(CATALOG_FILE))?;
    let processed_dir = data.join(PROCESSED_DIR);
    fs::create_dir_all(&processed_dir)?;

    let mut options = PipelineOptions::new();
    if sequential {
        options = options.sequential();
    }
    let pipeline = Pipeline::with_options(options);

    let retrieval = pipeline.retrieve(&catalog, &DirectorySource::new(data.join(RAW_DIR)));
    if !retrieval.failed.is_empty() {
        eprintln!(
            "{} {} documents missing from {}",
            "Warning:".yellow().bold(),
            retrieval.failed.len(),
            data.join(RAW_DIR).display()
        );
    }

    let pb = progress_bar(retrieval.documents.len());
    let processed = pipeline.reconstruct_with_progress(&retrieval.documents, |doc| {
        pb.set_message(doc.key());
        pb.inc(1);
    });
    pb.finish_with_message("done");

    let mut stats = rfcsearch::ReconstructStats::new();
    for doc in &processed {
        let path = processed_dir.join(format!("{}.txt", doc.key()));
        fs::write(&path, render::to_text(&doc.reconstruction.units))?;
        stats.merge(&doc.reconstruction.stats);
    }

    println!("\n{}", "Cleaning Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Documents".bold(), processed.len());
    println!("{}: {}", "Lines read".bold(), stats.lines_read);
    println!("{}: {}", "Headings".bold(), stats.headings);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Dropped".bold(), stats.dropped());
    println!("{}: {}", "Merges".bold(), stats.merges);
    println!("{}: {}", "Output".bold(), processed_dir.display());

    Ok(())
}

fn cmd_passages(data: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let processed_dir = data.join(PROCESSED_DIR);
    let mut files: Vec<PathBuf> = fs::read_dir(&processed_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    let mut passages = Vec::new();
    for file in &files {
        passages.extend(read_passages(file)?);
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data.join("passages.jsonl"));
    fs::write(&output, to_json_lines(&passages)?)?;

    println!(
        "{} {} passages from {} documents to {}",
        "Saved".green(),
        passages.len(),
        files.len(),
        output.display()
    );

    Ok(())
}

fn cmd_show(
    input: &Path,
    catalog: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .ok_or("Input file has no name")?;

    let record = match catalog {
        Some(path) => load_catalog(path)?
            .get(&key)
            .cloned()
            .ok_or_else(|| format!("{} is not in the catalog", key))?,
        None => CatalogRecord::new(key.as_str(), "", "", ""),
    };

    let bytes = fs::read(input)?;
    let result = SectionReconstructor::new().reconstruct_bytes(&bytes, &record);

    if json {
        println!("{}", to_json(&result, JsonFormat::Pretty)?);
    } else {
        print!("{}", render::to_text(&result.units));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "rfcsearch".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("RFC section reconstruction and passage extraction");
    println!();
    println!("License: MIT");
}
