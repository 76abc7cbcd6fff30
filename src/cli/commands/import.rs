//! `kbt import` command - CSV catalog ingestion
//!
//! Expected part CSV header: `name,slug,category` plus optional
//! `brand`, `price`, `notes` columns. Every other column becomes a
//! specification entry - numeric when the value parses as a number,
//! text otherwise. Empty cells are skipped.

use console::style;
use miette::{miette, IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::core::project::Project;
use crate::entities::part::{Part, PartCategory, SpecValue};

#[derive(clap::Subcommand, Debug)]
pub enum ImportCommands {
    /// Import parts from a CSV file
    Parts(PartsArgs),
}

#[derive(clap::Args, Debug)]
pub struct PartsArgs {
    /// CSV file to import
    #[arg(long)]
    pub csv: PathBuf,

    /// Parse and report without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cmd: ImportCommands) -> Result<()> {
    match cmd {
        ImportCommands::Parts(args) => run_parts(args),
    }
}

const RESERVED_COLUMNS: &[&str] = &["name", "slug", "category", "brand", "price", "notes"];

fn run_parts(args: PartsArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;

    let mut reader = csv::Reader::from_path(&args.csv)
        .map_err(|e| miette!("cannot read {}: {}", args.csv.display(), e))?;
    let headers = reader.headers().into_diagnostic()?.clone();

    for required in ["name", "slug", "category"] {
        if !headers.iter().any(|h| h == required) {
            return Err(miette!(
                "CSV is missing the required '{}' column (header: {})",
                required,
                headers.iter().collect::<Vec<_>>().join(", ")
            ));
        }
    }

    let mut imported = 0usize;
    let mut skipped = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record.into_diagnostic()?;
        let field = |name: &str| -> Option<&str> {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let (Some(name), Some(slug), Some(category_str)) =
            (field("name"), field("slug"), field("category"))
        else {
            skipped += 1;
            eprintln!(
                "{} row {}: missing name, slug or category - skipped",
                style("!").yellow(),
                line + 2
            );
            continue;
        };

        let category: PartCategory = match category_str.parse() {
            Ok(category) => category,
            Err(e) => {
                skipped += 1;
                eprintln!("{} row {}: {} - skipped", style("!").yellow(), line + 2, e);
                continue;
            }
        };

        let mut part = Part::new(name, slug, category);
        part.brand = field("brand").map(str::to_string);
        part.price = field("price").and_then(|v| v.parse::<f64>().ok());
        part.notes = field("notes").map(str::to_string);

        for (idx, header) in headers.iter().enumerate() {
            if RESERVED_COLUMNS.contains(&header) {
                continue;
            }
            let Some(value) = record.get(idx).map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            let spec = match value.parse::<f64>() {
                Ok(number) => SpecValue::Number(number),
                Err(_) => SpecValue::Text(value.to_string()),
            };
            part.specifications.insert(header.to_string(), spec);
        }

        if args.dry_run {
            println!("{} would import {} ({})", style("→").blue(), part.name, part.slug);
        } else {
            let path = project.parts_dir().join(format!("{}.yaml", part.id));
            let yaml = serde_yml::to_string(&part).into_diagnostic()?;
            fs::write(&path, yaml).into_diagnostic()?;
        }
        imported += 1;
    }

    let verb = if args.dry_run { "parsed" } else { "imported" };
    println!(
        "{} {} part(s) {}, {} skipped",
        style("✓").green(),
        imported,
        verb,
        skipped
    );

    Ok(())
}
