use clap::Parser;
use kbt::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => kbt::cli::commands::init::run(args),
        Commands::Engine(cmd) => kbt::cli::commands::engine::run(cmd, &global),
        Commands::Motor(cmd) => kbt::cli::commands::motor::run(cmd, &global),
        Commands::Part(cmd) => kbt::cli::commands::part::run(cmd, &global),
        Commands::Build(cmd) => kbt::cli::commands::build::run(cmd, &global),
        Commands::Check(args) => kbt::cli::commands::check::run(args, &global),
        Commands::Perf(args) => kbt::cli::commands::perf::run(args, &global),
        Commands::Gear(args) => kbt::cli::commands::gear::run(args),
        Commands::Report(args) => kbt::cli::commands::report::run(args, &global),
        Commands::Validate(args) => kbt::cli::commands::validate::run(args, &global),
        Commands::Import(cmd) => kbt::cli::commands::import::run(cmd),
        Commands::Completions(args) => kbt::cli::commands::completions::run(args),
    }
}
