//! `kbt engine` command - Gas engine catalog

use console::style;
use miette::{miette, Result};

use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::load_all;
use crate::core::project::Project;
use crate::entities::engine::GasEngine;

#[derive(clap::Subcommand, Debug)]
pub enum EngineCommands {
    /// List engines
    List(ListArgs),

    /// Show an engine's details
    Show(ShowArgs),
}

/// Column definitions for engine list output
const ENGINE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("slug", "SLUG", 24),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("cc", "CC", 8),
    ColumnDef::new("hp", "HP", 6),
    ColumnDef::new("shaft", "SHAFT", 7),
    ColumnDef::new("price", "PRICE", 10),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
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
    /// Engine ID or slug
    pub reference: String,
}

pub fn run(cmd: EngineCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EngineCommands::List(args) => run_list(args, global),
        EngineCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let mut engines: Vec<GasEngine> = load_all(&project.engines_dir())?;

    if let Some(ref needle) = args.search {
        let needle = needle.to_lowercase();
        engines.retain(|e| {
            e.name.to_lowercase().contains(&needle)
                || e.brand
                    .as_deref()
                    .map_or(false, |b| b.to_lowercase().contains(&needle))
        });
    }

    engines.sort_by(|a, b| a.slug.cmp(&b.slug));

    if args.count {
        println!("{}", engines.len());
        return Ok(());
    }

    if engines.is_empty() {
        println!("No engines found.");
        return Ok(());
    }

    if let Some(limit) = args.limit {
        engines.truncate(limit);
    }

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&engines).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    let rows = engines.iter().map(|engine| {
        TableRow::new(engine.id.to_string())
            .cell("slug", CellValue::Slug(engine.slug.clone()))
            .cell("name", CellValue::Text(engine.name.clone()))
            .cell("cc", CellValue::Float(engine.displacement_cc, 0))
            .cell("hp", CellValue::Float(engine.horsepower, 1))
            .cell("shaft", CellValue::Float(engine.shaft_diameter_in, 3))
            .cell("price", CellValue::Money(engine.price))
    });

    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    TableFormatter::new(ENGINE_COLUMNS, "engine")
        .with_config(config)
        .output(rows, global.format);

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let engines: Vec<GasEngine> = load_all(&project.engines_dir())?;

    let engine = crate::core::entity::find_record(&engines, &args.reference)
        .ok_or_else(|| miette!("engine not found: {}", args.reference))?;

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(engine).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    println!("{} {}", style(&engine.slug).cyan().bold(), engine.name);
    println!("  id:            {}", engine.id);
    if let Some(ref brand) = engine.brand {
        println!("  brand:         {}", brand);
    }
    println!("  displacement:  {} cc", engine.displacement_cc);
    println!("  horsepower:    {} hp", engine.horsepower);
    if engine.torque_ftlb > 0.0 {
        println!("  torque:        {} ft-lb", engine.torque_ftlb);
    }
    println!(
        "  shaft:         {}\" {}",
        engine.shaft_diameter_in, engine.shaft_type
    );
    if let Some(rpm) = engine.max_rpm {
        println!("  max rpm:       {}", rpm);
    }
    if let Some(weight) = engine.weight_lb {
        println!("  weight:        {} lb", weight);
    }
    if let Some(price) = engine.price {
        println!("  price:         ${:.2}", price);
    }
    if !engine.clones.is_empty() {
        println!("  clones:        {}", engine.clones.join(", "));
    }
    if let Some(ref notes) = engine.notes {
        println!("  notes:         {}", notes);
    }

    Ok(())
}
