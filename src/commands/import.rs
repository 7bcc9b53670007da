//! Seed import command
//!
//! Usage: navseed import <KIND> <FILE> [--db <PATH>] [--dry-run] [--keep-going]

use anyhow::{Context, Result};
use clap::Args;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::bulkparse::{BulkParser, ImportKind};
use crate::config::Config;
use crate::db::Store;
use crate::importer::{ImportError, RowSource, SeedImporter};
use crate::inventory::{Inventory, MemoryStore};
use crate::models::Record;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Seed file kind (netbox, location, room, org, prefix, usage, type, vendor, subcat, cabling, patch)
    pub kind: ImportKind,

    /// Path to the seed file
    pub file: PathBuf,

    /// Database file, overrides NAVSEED_DB_PATH
    #[arg(long)]
    pub db: Option<String>,

    /// Check the file against the database without saving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Save the rows that imported cleanly even if other rows failed
    #[arg(long)]
    pub keep_going: bool,
}

/// What happened to the rows of one seed file
#[derive(Debug, Default)]
pub struct ImportReport {
    pub rows: usize,
    pub failures: Vec<(usize, ImportError)>,
    /// New records, in the order they were created
    pub created: Vec<Record>,
}

impl ImportReport {
    pub fn succeeded(&self) -> usize {
        self.rows - self.failures.len()
    }
}

/// Import every row of a seed file into the in-memory inventory.
///
/// Objects from a good row are persisted before the next row is built, so
/// later rows can refer to them. Bad rows are collected in the report.
pub fn run_import<P: RowSource>(
    kind: ImportKind,
    rows: P,
    inventory: &mut MemoryStore,
) -> Result<ImportReport> {
    let mut importer = SeedImporter::new(kind, rows, inventory);
    let mut report = ImportReport::default();

    while let Some((line, outcome)) = importer.advance() {
        report.rows += 1;
        match outcome {
            Ok(objects) => {
                let created = importer
                    .store_mut()
                    .persist(objects)
                    .with_context(|| format!("Failed to persist line {}", line))?;
                report.created.extend(created);
            }
            Err(e) => {
                tracing::warn!(line, entity = ?e.entity(), "Skipping {} row: {}", kind, e);
                report.failures.push((line, e));
            }
        }
    }

    let entity = kind.entity();
    tracing::debug!(
        "Inventory now holds {} {} records ({} in total)",
        importer.store().count(entity),
        entity,
        importer.store().len()
    );
    Ok(report)
}

/// Execute import command. Returns false if any row failed.
pub async fn execute(args: ImportArgs, cfg: &Config) -> Result<bool> {
    let db_path = args.db.clone().unwrap_or_else(|| cfg.db_path.clone());
    let store = Store::with_pool_size(&db_path, cfg.db_max_connections).await?;
    tracing::info!("Database: {}", db_path);

    let mut inventory = store.load_inventory().await?;

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    tracing::info!("Importing {} rows from {}", args.kind, args.file.display());
    let parser = BulkParser::new(BufReader::new(file), args.kind);
    let report = run_import(args.kind, parser, &mut inventory)?;

    for (line, error) in &report.failures {
        println!("line {}: {}", line, error);
    }

    let saved = if args.dry_run {
        tracing::info!("Dry run, nothing saved");
        0
    } else if !report.failures.is_empty() && !args.keep_going {
        tracing::warn!(
            "{} of {} rows failed, nothing saved (use --keep-going to save the rest)",
            report.failures.len(),
            report.rows
        );
        0
    } else {
        let saved = store.save_records(&report.created).await?;
        let kinds: BTreeSet<_> = report.created.iter().map(Record::kind).collect();
        for kind in kinds {
            tracing::info!("{} {} records in database", store.count(kind).await?, kind);
        }
        saved
    };

    println!(
        "{}: {} rows, {} ok, {} failed, {} records saved",
        args.file.display(),
        report.rows,
        report.succeeded(),
        report.failures.len(),
        saved
    );

    Ok(report.failures.is_empty())
}
