use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::bail;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::{info, warn};

use casekit::case_study::CaseStudy;
use casekit::settings::Settings;
use casekit::{db, parser, source};

const DEFAULT_TITLE: &str = "Case Study";

#[derive(Parser)]
#[command(name = "casekit", about = "Turn case-study documents into structured website content")]
struct Cli {
    /// SQLite database path (overrides CASEKIT_DB_PATH / casekit.toml)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one document and print the structured content as JSON
    Parse {
        file: PathBuf,
    },
    /// Parse documents and merge them into stored case studies
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Company name (default: file name)
        #[arg(short, long)]
        company: Option<String>,
        /// Case study title
        #[arg(short, long)]
        title: Option<String>,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Case studies in display order
    List,
    /// Print one case study as JSON
    Show {
        id: String,
    },
    /// Delete case studies by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move the given ids to the front, in the given order
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(db) = cli.db {
        settings.db_path = db;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();

    let result = match cli.command {
        Commands::Parse { file } => {
            let text = source::extract_text(&file)?;
            let parsed = parser::extract(&text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(())
        }
        Commands::Import {
            files,
            company,
            title,
            tags,
        } => {
            let conn = open_store(&settings)?;
            let opts = ImportOptions {
                company,
                title,
                tags,
            };
            info!(files = files.len(), db = %settings.db_path.display(), "importing");
            let counts = import_files(&conn, &files, &opts, settings.chunk_size)?;
            counts.print();
            Ok(())
        }
        Commands::List => {
            let conn = open_store(&settings)?;
            let rows = db::list(&conn)?;
            if rows.is_empty() {
                println!("No case studies. Run 'import' first.");
                return Ok(());
            }

            println!(
                "{:>5} | {:<32} | {:<20} | {:<24} | {:>4} | {:>4} | {:>4}",
                "Order", "Id", "Company", "Title", "Chal", "Proc", "Res"
            );
            println!("{}", "-".repeat(108));
            for r in &rows {
                println!(
                    "{:>5} | {:<32} | {:<20} | {:<24} | {:>4} | {:>4} | {:>4}",
                    r.display_order,
                    truncate(&r.id, 32),
                    truncate(&r.company, 20),
                    truncate(&r.title, 24),
                    r.challenge.len(),
                    r.process.len(),
                    r.results.len(),
                );
            }
            println!("\n{} case studies", rows.len());
            Ok(())
        }
        Commands::Show { id } => {
            let conn = open_store(&settings)?;
            match db::get(&conn, &id)? {
                Some(cs) => {
                    println!("{}", serde_json::to_string_pretty(&cs)?);
                    Ok(())
                }
                None => bail!("No case study with id {:?}", id),
            }
        }
        Commands::Delete { ids } => {
            let conn = open_store(&settings)?;
            let removed = db::delete(&conn, &ids)?;
            println!("Deleted {} of {} case studies.", removed, ids.len());
            Ok(())
        }
        Commands::Reorder { ids } => {
            let conn = open_store(&settings)?;
            let moved = db::reorder(&conn, &ids)?;
            if moved < ids.len() {
                warn!(requested = ids.len(), moved, "some ids were not found");
            }
            println!("Reordered {} case studies.", moved);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn open_store(settings: &Settings) -> anyhow::Result<Connection> {
    let conn = db::connect(&settings.db_path)?;
    db::init_schema(&conn)?;
    Ok(conn)
}

struct ImportOptions {
    company: Option<String>,
    title: Option<String>,
    tags: Vec<String>,
}

#[derive(Default)]
struct ImportCounts {
    saved: usize,
    empty: usize,
    failed: usize,
}

impl ImportCounts {
    fn print(&self) {
        println!(
            "Saved {} case studies ({} documents had no recognizable sections, {} failed).",
            self.saved, self.empty, self.failed,
        );
    }
}

fn import_files(
    conn: &Connection,
    files: &[PathBuf],
    opts: &ImportOptions,
    chunk_size: usize,
) -> anyhow::Result<ImportCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut counts = ImportCounts::default();
    let mut next_order = db::next_display_order(conn)?;

    for chunk in files.chunks(chunk_size.max(1)) {
        let parsed: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, source::extract_text(path).map(|text| parser::extract(&text))))
            .collect();

        let mut records: Vec<CaseStudy> = Vec::new();
        for (path, result) in parsed {
            let content = match result {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping document");
                    counts.failed += 1;
                    continue;
                }
            };
            if content.is_empty() {
                warn!(path = %path.display(), "no recognizable sections");
                counts.empty += 1;
            }

            let company = opts.company.clone().unwrap_or_else(|| file_stem(path));
            let fresh = CaseStudy::new(&company, opts.title.as_deref().unwrap_or(DEFAULT_TITLE));

            // Several files may target the same case study within one chunk.
            if let Some(pending) = records.iter_mut().find(|r| r.id == fresh.id) {
                pending.merge(content);
                continue;
            }

            let mut cs = match db::get(conn, &fresh.id)? {
                Some(existing) => existing,
                None => {
                    let mut cs = fresh;
                    cs.display_order = next_order;
                    next_order += 1;
                    cs
                }
            };
            cs.merge(content);
            cs.add_tags(&opts.tags);
            records.push(cs);
        }

        counts.saved += db::upsert(conn, &records)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_default()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
