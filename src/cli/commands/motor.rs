//! `kbt motor` command - Electric motor catalog

use console::style;
use miette::{miette, Result};

use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::load_all;
use crate::core::project::Project;
use crate::entities::motor::ElectricMotor;

#[derive(clap::Subcommand, Debug)]
pub enum MotorCommands {
    /// List motors
    List(ListArgs),

    /// Show a motor's details
    Show(ShowArgs),
}

/// Column definitions for motor list output
const MOTOR_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("slug", "SLUG", 24),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("voltage", "VOLTS", 7),
    ColumnDef::new("kw", "KW", 6),
    ColumnDef::new("hp", "HP", 6),
    ColumnDef::new("price", "PRICE", 10),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in name and brand (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by system voltage
    #[arg(long)]
    pub voltage: Option<f64>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Motor ID or slug
    pub reference: String,
}

pub fn run(cmd: MotorCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MotorCommands::List(args) => run_list(args, global),
        MotorCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let mut motors: Vec<ElectricMotor> = load_all(&project.motors_dir())?;

    if let Some(ref needle) = args.search {
        let needle = needle.to_lowercase();
        motors.retain(|m| {
            m.name.to_lowercase().contains(&needle)
                || m.brand
                    .as_deref()
                    .map_or(false, |b| b.to_lowercase().contains(&needle))
        });
    }

    if let Some(voltage) = args.voltage {
        motors.retain(|m| (m.voltage - voltage).abs() < f64::EPSILON);
    }

    motors.sort_by(|a, b| a.slug.cmp(&b.slug));

    if args.count {
        println!("{}", motors.len());
        return Ok(());
    }

    if motors.is_empty() {
        println!("No motors found.");
        return Ok(());
    }

    if let Some(limit) = args.limit {
        motors.truncate(limit);
    }

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&motors).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    let rows = motors.iter().map(|motor| {
        TableRow::new(motor.id.to_string())
            .cell("slug", CellValue::Slug(motor.slug.clone()))
            .cell("name", CellValue::Text(motor.name.clone()))
            .cell("voltage", CellValue::Float(motor.voltage, 0))
            .cell("kw", CellValue::Float(motor.power_kw, 1))
            .cell("hp", CellValue::Float(motor.horsepower, 1))
            .cell("price", CellValue::Money(motor.price))
    });

    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    TableFormatter::new(MOTOR_COLUMNS, "motor")
        .with_config(config)
        .output(rows, global.format);

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let motors: Vec<ElectricMotor> = load_all(&project.motors_dir())?;

    let motor = crate::core::entity::find_record(&motors, &args.reference)
        .ok_or_else(|| miette!("motor not found: {}", args.reference))?;

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(motor).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    println!("{} {}", style(&motor.slug).cyan().bold(), motor.name);
    println!("  id:            {}", motor.id);
    if let Some(ref brand) = motor.brand {
        println!("  brand:         {}", brand);
    }
    println!("  voltage:       {} V", motor.voltage);
    println!("  power:         {} kW ({} hp)", motor.power_kw, motor.horsepower);
    if motor.torque_ftlb > 0.0 {
        println!("  torque:        {} ft-lb", motor.torque_ftlb);
    }
    if let Some(rpm) = motor.rpm {
        println!("  rated rpm:     {}", rpm);
    }
    if let Some(shaft) = motor.shaft_diameter_in {
        println!("  shaft:         {}\" {}", shaft, motor.shaft_type);
    }
    if let Some(weight) = motor.weight_lb {
        println!("  weight:        {} lb", weight);
    }
    if let Some(price) = motor.price {
        println!("  price:         ${:.2}", price);
    }
    if let Some(ref notes) = motor.notes {
        println!("  notes:         {}", notes);
    }

    Ok(())
}
