use celestial_constants::{global, render_table, Domain, UnitSystem};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "celestial-constants")]
#[command(about = "Inspect versioned CODATA and IAU constants")]
struct Cli {
    /// Physical constants epoch or release (e.g. codata2010, release-2013)
    #[arg(long, global = true)]
    physical: Option<String>,

    /// Astronomical constants epoch or release (e.g. iau2012, release-2020)
    #[arg(long, global = true)]
    astronomical: Option<String>,

    /// Log lock-in and binding at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one constant
    Show {
        /// Abbreviation, e.g. h, G, M_sun
        abbrev: String,
        /// Unit system: si, cgs, esu, emu or gauss
        #[arg(long)]
        system: Option<UnitSystem>,
    },
    /// Print every bound constant
    Table {
        /// Emit JSON instead of the fixed-width table
        #[arg(long)]
        json: bool,
    },
    /// Print the active epoch of each domain
    Active,
    /// List registered epochs and releases
    Epochs,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(id) = &cli.physical {
        global::select(Domain::Physical, id)?;
    }
    if let Some(id) = &cli.astronomical {
        global::select(Domain::Astronomical, id)?;
    }

    match cli.command {
        Commands::Show { abbrev, system } => match system {
            Some(UnitSystem::Cgs) => {
                let constant = global::lookup(&abbrev)?;
                println!("{} [{}]", constant.abbrev(), constant.epoch());
                println!("  Name   = {}", constant.name());
                println!("  cgs    = {}", constant.cgs()?);
                println!("  Reference = {}", constant.reference());
            }
            Some(system) => {
                let constant = global::lookup_in(&abbrev, system)?;
                println!("{} [{}]", constant.abbrev(), constant.epoch());
                println!("{}", constant);
            }
            None => {
                let constant = global::lookup(&abbrev)?;
                println!("{} [{}]", constant.abbrev(), constant.epoch());
                println!("{}", constant);
            }
        },
        Commands::Table { json } => {
            let rows = global::documentation_rows()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", render_table(&rows));
            }
        }
        Commands::Active => {
            for domain in Domain::ALL {
                println!("{:<13} {}", domain, global::get_active(domain)?);
            }
        }
        Commands::Epochs => {
            let registry = global::registry()?;
            let catalog = registry.catalog();
            for domain in Domain::ALL {
                let active = registry.get_active(domain);
                println!("{}:", domain);
                for id in catalog.ids(domain) {
                    let marker = if id == active { '*' } else { ' ' };
                    let reference = catalog.get(id).map(|s| s.reference()).unwrap_or_default();
                    println!("  {} {:<12} {}", marker, id, reference);
                }
            }
            println!("releases:");
            for release in catalog.releases() {
                println!(
                    "    {:<12} {} + {}",
                    release.name, release.physical, release.astronomical
                );
            }
        }
    }

    Ok(())
}
