//! `kbt part` command - Part catalog

use console::style;
use miette::{miette, Result};

use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::load_all;
use crate::core::project::Project;
use crate::entities::part::{Part, PartCategory, SpecValue};

#[derive(clap::Subcommand, Debug)]
pub enum PartCommands {
    /// List parts with filtering
    List(ListArgs),

    /// Show a part's details (includes specifications)
    Show(ShowArgs),
}

/// Column definitions for part list output
const PART_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("slug", "SLUG", 26),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("category", "CATEGORY", 18),
    ColumnDef::new("brand", "BRAND", 14),
    ColumnDef::new("price", "PRICE", 10),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category (e.g. clutch, torque_converter)
    #[arg(long, short = 'c')]
    pub category: Option<PartCategory>,

    /// Search in name and brand (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part ID or slug
    pub reference: String,
}

pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartCommands::List(args) => run_list(args, global),
        PartCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let mut parts: Vec<Part> = load_all(&project.parts_dir())?;

    if let Some(category) = args.category {
        parts.retain(|p| p.category == category);
    }

    if let Some(ref needle) = args.search {
        let needle = needle.to_lowercase();
        parts.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.brand
                    .as_deref()
                    .map_or(false, |b| b.to_lowercase().contains(&needle))
        });
    }

    parts.sort_by(|a, b| (a.category, &a.slug).cmp(&(b.category, &b.slug)));

    if args.count {
        println!("{}", parts.len());
        return Ok(());
    }

    if parts.is_empty() {
        println!("No parts found.");
        return Ok(());
    }

    if let Some(limit) = args.limit {
        parts.truncate(limit);
    }

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&parts).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    let rows = parts.iter().map(|part| {
        TableRow::new(part.id.to_string())
            .cell("slug", CellValue::Slug(part.slug.clone()))
            .cell("name", CellValue::Text(part.name.clone()))
            .cell("category", CellValue::Category(part.category))
            .cell(
                "brand",
                part.brand
                    .clone()
                    .map(CellValue::Text)
                    .unwrap_or(CellValue::Empty),
            )
            .cell("price", CellValue::Money(part.price))
    });

    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    TableFormatter::new(PART_COLUMNS, "part")
        .with_config(config)
        .output(rows, global.format);

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let parts: Vec<Part> = load_all(&project.parts_dir())?;

    let part = crate::core::entity::find_record(&parts, &args.reference)
        .ok_or_else(|| miette!("part not found: {}", args.reference))?;

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(part).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    println!("{} {}", style(&part.slug).cyan().bold(), part.name);
    println!("  id:        {}", part.id);
    println!("  category:  {}", part.category.label());
    if let Some(ref brand) = part.brand {
        println!("  brand:     {}", brand);
    }
    if let Some(price) = part.price {
        println!("  price:     ${:.2}", price);
    }
    if !part.specifications.is_empty() {
        println!("  specifications:");
        for (key, value) in &part.specifications {
            let rendered = match value {
                SpecValue::Number(n) => format!("{}", n),
                SpecValue::Bool(b) => format!("{}", b),
                SpecValue::Text(s) => s.clone(),
                SpecValue::List(items) => items.join(", "),
            };
            println!("    {}: {}", key, rendered);
        }
    }
    if let Some(ref notes) = part.notes {
        println!("  notes:     {}", notes);
    }

    Ok(())
}
