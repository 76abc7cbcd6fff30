//! `kbt gear` command - Standalone gear ratio and wheel speed calculator

use console::style;
use miette::{miette, Result};

use crate::perf::drive_speed_mph;

#[derive(clap::Args, Debug)]
pub struct GearArgs {
    /// Drive (clutch/engine side) sprocket teeth
    #[arg(long, short = 'd')]
    pub drive: u32,

    /// Driven (axle side) sprocket teeth
    #[arg(long, short = 'D')]
    pub driven: u32,

    /// Engine RPM (default 3600)
    #[arg(long, default_value_t = 3600.0)]
    pub rpm: f64,

    /// Tire diameter in inches (default 11)
    #[arg(long, default_value_t = 11.0)]
    pub tire: f64,
}

pub fn run(args: GearArgs) -> Result<()> {
    if args.drive == 0 || args.driven == 0 {
        return Err(miette!("tooth counts must be greater than zero"));
    }

    let ratio = args.driven as f64 / args.drive as f64;
    let speed = drive_speed_mph(args.rpm, ratio, args.tire);

    println!(
        "{}  {}T / {}T",
        style("gear ratio").bold(),
        args.driven,
        args.drive
    );
    println!("  ratio:      {:.2} : 1", ratio);
    println!(
        "  top speed:  {:.1} mph @ {} rpm on {}\" tires",
        (speed * 10.0).round() / 10.0,
        args.rpm,
        args.tire
    );

    Ok(())
}
