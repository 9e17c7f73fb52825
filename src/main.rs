//! CLI entry point for `usenet-import`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use usenet_import::config::{self, Config};
use usenet_import::import::{collect_archive_files, ArchiveParser, ImportStats};
use usenet_import::store::{snapshot, MemoryStore};
use usenet_import::tables::SharedTables;

/// Import historical Usenet archives (mbox and A News) into a post store.
#[derive(Parser)]
#[command(name = "usenet-import", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (overrides $USENET_IMPORT_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse archive files or directories into the store
    Import {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
        /// Snapshot file to load and update
        #[arg(long, value_name = "FILE")]
        db: Option<PathBuf>,
        /// Word list for the language filter
        #[arg(long, value_name = "FILE")]
        dictionary: Option<PathBuf>,
        /// Timezone abbreviation table
        #[arg(long, value_name = "FILE")]
        timezones: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Strip transfer noise above the header block, in place
    Clean { path: PathBuf },
    /// Show statistics for a snapshot
    Stats {
        #[arg(long, value_name = "FILE")]
        db: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Import {
            paths,
            db,
            dictionary,
            timezones,
            json,
        } => {
            let db = db.unwrap_or_else(|| config::database_path(&config));
            let dictionary = dictionary.or_else(|| config.tables.dictionary.clone());
            let timezones = timezones.or_else(|| config.tables.timezones.clone());
            let tables = SharedTables::load(dictionary.as_deref(), timezones.as_deref());
            cmd_import(&paths, &db, &tables, &config, json)
        }
        Commands::Clean { path } => cmd_clean(&path),
        Commands::Stats { db, json } => {
            let db = db.unwrap_or_else(|| config::database_path(&config));
            cmd_stats(&db, json)
        }
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "usenet-import.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "usenet-import", &mut std::io::stdout());
    Ok(())
}

fn cmd_manpage() -> anyhow::Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Outcome of one input file.
struct FileReport {
    path: PathBuf,
    result: Result<ImportStats, String>,
}

/// Import every archive below `paths` into the snapshot at `db`.
///
/// A file that cannot be read is reported and skipped; the rest of the batch
/// still runs and the snapshot is saved at the end.
fn cmd_import(
    paths: &[PathBuf],
    db: &Path,
    tables: &SharedTables,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let mut files = Vec::new();
    for path in paths {
        files.extend(collect_archive_files(path)?);
    }
    let total_bytes: u64 = files
        .iter()
        .filter_map(|f| std::fs::metadata(f).ok())
        .map(|m| m.len())
        .sum();

    let mut store = snapshot::load_or_default(db)
        .with_context(|| format!("loading snapshot {}", db.display()))?;

    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} Importing [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}",
            )?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut done: u64 = 0;
    let mut reports = Vec::with_capacity(files.len());

    for file in &files {
        pb.set_message(file.display().to_string());
        let base = done;
        let result = ArchiveParser::open_with_capacity(file, tables, config.import.read_buffer_size)
            .and_then(|mut parser| {
                parser.process_all(
                    &mut store,
                    Some(&|current, _total| pb.set_position(base + current)),
                )
            });
        match &result {
            Ok(stats) => done += stats.bytes,
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Failed to import archive");
                done += std::fs::metadata(file).map(|m| m.len()).unwrap_or(0);
            }
        }
        pb.set_position(done);
        reports.push(FileReport {
            path: file.clone(),
            result: result.map_err(|e| e.to_string()),
        });
    }
    pb.finish_and_clear();

    snapshot::save(db, &store).with_context(|| format!("saving snapshot {}", db.display()))?;

    let mut total = ImportStats::default();
    for report in &reports {
        if let Ok(stats) = &report.result {
            total.absorb(stats);
        }
    }

    if json {
        print_import_json(db, &reports, &total, start.elapsed())
    } else {
        print_import_table(db, &reports, &total, &store, start.elapsed());
        Ok(())
    }
}

fn cmd_clean(path: &Path) -> anyhow::Result<()> {
    let cleaned = usenet_import::preprocess::clean_path(path)?;
    println!("  Cleaned {cleaned} file(s) under {}", path.display());
    Ok(())
}

fn cmd_stats(db: &Path, json: bool) -> anyhow::Result<()> {
    let store = snapshot::load(db).with_context(|| format!("loading snapshot {}", db.display()))?;
    let db_size = std::fs::metadata(db).map(|m| m.len()).unwrap_or(0);

    if json {
        print_stats_json(db, db_size, &store)
    } else {
        print_stats_table(db, db_size, &store);
        Ok(())
    }
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Print an import summary in a human-readable table.
fn print_import_table(
    db: &Path,
    reports: &[FileReport],
    total: &ImportStats,
    store: &MemoryStore,
    elapsed: std::time::Duration,
) {
    use humansize::{format_size, BINARY};

    println!();
    for report in reports {
        match &report.result {
            Ok(stats) => {
                let format = stats
                    .format
                    .map(|f| format!("{f:?}"))
                    .unwrap_or_default();
                println!(
                    "  {:<40} {:<6} {:>6} new {:>6} dup {:>5} skipped",
                    report.path.display(),
                    format,
                    stats.created,
                    stats.duplicates,
                    stats.skips.len()
                );
                if let Some(reason) = &stats.aborted {
                    println!("    stopped early: {reason}");
                }
            }
            Err(e) => println!("  {:<40} failed: {e}", report.path.display()),
        }
    }

    println!();
    println!("  {:<20} {}", "Files", reports.len());
    println!("  {:<20} {}", "Archive size", format_size(total.bytes, BINARY));
    println!("  {:<20} {}", "Parsed", total.parsed);
    println!("  {:<20} {}", "New posts", total.created);
    println!("  {:<20} {}", "Duplicates", total.duplicates);
    println!("  {:<20} {}", "Group links added", total.groups_linked);
    println!("  {:<20} {}", "Skipped", total.skips.len());
    println!("  {:<20} {}", "Posts in store", store.post_count());
    println!("  {:<20} {}", "Snapshot", db.display());
    println!("  {:<20} {:.2?}", "Time", elapsed);
    println!();
}

fn print_import_json(
    db: &Path,
    reports: &[FileReport],
    total: &ImportStats,
    elapsed: std::time::Duration,
) -> anyhow::Result<()> {
    let files: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| match &r.result {
            Ok(stats) => serde_json::json!({
                "path": r.path.to_string_lossy(),
                "stats": stats,
            }),
            Err(e) => serde_json::json!({
                "path": r.path.to_string_lossy(),
                "error": e,
            }),
        })
        .collect();

    let output = serde_json::json!({
        "database": db.to_string_lossy(),
        "files": files,
        "total": total,
        "elapsed_ms": elapsed.as_millis(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print store statistics in a human-readable table.
fn print_stats_table(db: &Path, db_size: u64, store: &MemoryStore) {
    use humansize::{format_size, BINARY};

    println!();
    println!("  {:<20} {}", "Snapshot", db.display());
    println!("  {:<20} {}", "Size", format_size(db_size, BINARY));
    println!("  {:<20} {}", "Posts", store.post_count());
    println!("  {:<20} {}", "Newsgroups", store.group_count());
    println!("  {:<20} {}", "Group links", store.link_count());
    if let Some((min, max)) = store.date_range() {
        println!(
            "  {:<20} {} to {}",
            "Date range",
            format_timestamp(min),
            format_timestamp(max)
        );
    }

    let top = store.top_groups(10);
    if !top.is_empty() {
        println!();
        println!("  Top newsgroups:");
        for (group, count) in &top {
            println!("    {count:>6}  {group}");
        }
    }
    println!();
}

fn print_stats_json(db: &Path, db_size: u64, store: &MemoryStore) -> anyhow::Result<()> {
    let date_range = store.date_range().map(|(min, max)| {
        serde_json::json!({
            "oldest": min,
            "newest": max,
        })
    });
    let top: Vec<serde_json::Value> = store
        .top_groups(10)
        .iter()
        .map(|(group, count)| serde_json::json!({ "group": group, "count": count }))
        .collect();

    let stats = serde_json::json!({
        "database": db.to_string_lossy(),
        "size": db_size,
        "posts": store.post_count(),
        "newsgroups": store.group_count(),
        "group_links": store.link_count(),
        "date_range": date_range,
        "top_groups": top,
    });
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
