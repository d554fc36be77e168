//! `gcal` CLI — calendar conversion and arithmetic from the command line.
//!
//! Instants are seconds since 1970-01-01T00:00:00Z; every command prints a
//! single JSON object on stdout.
//!
//! ## Usage
//!
//! ```sh
//! # Calendar fields of an instant in Los Angeles
//! gcal --zone America/Los_Angeles components --at 825723300
//!
//! # Only some fields
//! gcal components --at 825723300 --units year,weekOfYear,yearForWeekOfYear
//!
//! # Instant for a set of fields (stdin or -i file)
//! echo '{"year":2024,"month":3,"day":10,"hour":2,"minute":30}' | gcal --zone America/Los_Angeles date
//!
//! # Add one month, or wrap 40 days inside the month
//! gcal add --at 825723300 --unit month --amount 1
//! gcal add --at 825723300 --unit day --amount 40 --wrap
//!
//! # Add several fields at once
//! gcal add --at 825723300 --components '{"month":1,"day":1}'
//!
//! # Position of a day within its year, start of the week, valid day range
//! gcal ordinality --at 825723300 --small day --large year
//! gcal start --at 825723300 --unit weekOfYear
//! gcal range --at 825723300 --small day --large month
//!
//! # ISO week rules from a config file, with debug logging on stderr
//! gcal --config calendar.json -v components --at 1609466400
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gregorian_engine::{
    AbsoluteTime, CalendarConfiguration, CalendarEngine, CalendarUnit, ConfigFile, DateComponents, DstPolicy,
    GregorianCalendar, TransitionPolicy, UnitSet,
};
use serde_json::json;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gcal", version, about = "Proleptic Gregorian calendar engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Time zone: an IANA name or a fixed offset such as +05:30
    #[arg(long, global = true)]
    zone: Option<String>,

    /// First day of the week, 1 = Sunday through 7 = Saturday
    #[arg(long, global = true)]
    first_weekday: Option<i64>,

    /// Minimum days of a year's first week, 1 through 7
    #[arg(long, global = true)]
    min_days: Option<i64>,

    /// Region whose week rules fill in absent week values (e.g. "DE")
    #[arg(long, global = true)]
    region: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log decisions to stderr (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the calendar fields of an instant
    Components {
        /// Seconds since the epoch
        #[arg(long, allow_hyphen_values = true)]
        at: f64,
        /// Comma-separated units to fill (all units if omitted)
        #[arg(long, value_delimiter = ',')]
        units: Vec<CalendarUnit>,
    },
    /// Resolve JSON date components to an instant
    Date {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Which offset to use for a repeated local time
        #[arg(long, value_enum, default_value_t = Policy::Former)]
        repeated: Policy,
        /// Which offset to use for a skipped local time
        #[arg(long, value_enum, default_value_t = Policy::Former)]
        skipped: Policy,
    },
    /// Add an amount of one unit, or a JSON set of amounts, to an instant
    Add {
        /// Seconds since the epoch
        #[arg(long, allow_hyphen_values = true)]
        at: f64,
        /// Unit to add
        #[arg(long, requires = "amount", conflicts_with = "components")]
        unit: Option<CalendarUnit>,
        /// Amount of the unit (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<i64>,
        /// JSON object of per-unit amounts, e.g. '{"month":1,"day":1}'
        #[arg(long)]
        components: Option<String>,
        /// Wrap within the containing unit instead of carrying
        #[arg(long)]
        wrap: bool,
    },
    /// Position of a smaller unit within a larger one
    Ordinality {
        #[arg(long, allow_hyphen_values = true)]
        at: f64,
        #[arg(long)]
        small: CalendarUnit,
        #[arg(long)]
        large: CalendarUnit,
    },
    /// Start of the unit containing an instant
    Start {
        #[arg(long, allow_hyphen_values = true)]
        at: f64,
        #[arg(long)]
        unit: CalendarUnit,
    },
    /// Range of values a unit takes, as a half-open interval
    Range {
        /// Seconds since the epoch (required unless --minimum or --maximum)
        #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["minimum", "maximum"])]
        at: Option<f64>,
        #[arg(long)]
        small: CalendarUnit,
        /// Containing unit (required unless --minimum or --maximum)
        #[arg(long, required_unless_present_any = ["minimum", "maximum"])]
        large: Option<CalendarUnit>,
        /// Smallest range the unit ever has
        #[arg(long, conflicts_with = "maximum")]
        minimum: bool,
        /// Largest range the unit ever has
        #[arg(long)]
        maximum: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    Former,
    Latter,
}

impl From<Policy> for TransitionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Former => TransitionPolicy::Former,
            Policy::Latter => TransitionPolicy::Latter,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_configuration(&cli)?;
    debug!(
        zone = %config.zone(),
        first_weekday = config.first_weekday(),
        minimum_days = config.minimum_days_in_first_week(),
        "calendar configured"
    );
    let cal = GregorianCalendar::new(config);

    let output = match cli.command {
        Commands::Components { at, units } => {
            let units = if units.is_empty() {
                UnitSet::all()
            } else {
                units.into_iter().collect()
            };
            serde_json::to_value(cal.components(units, AbsoluteTime::new(at)))?
        }
        Commands::Date {
            input,
            repeated,
            skipped,
        } => {
            let text = read_input(input.as_deref())?;
            let components: DateComponents =
                serde_json::from_str(&text).context("Failed to parse date components JSON")?;
            let policy = DstPolicy {
                repeated: repeated.into(),
                skipped: skipped.into(),
            };
            let at = cal
                .date_with_policy(&components, policy)
                .context("Components do not identify a representable date")?;
            json!({ "at": at.seconds() })
        }
        Commands::Add {
            at,
            unit,
            amount,
            components,
            wrap,
        } => {
            let at = AbsoluteTime::new(at);
            let result = match (unit, amount, components) {
                (Some(unit), Some(amount), _) => cal
                    .add(unit, amount, at, wrap)
                    .with_context(|| format!("Adding {amount} {unit} leaves the representable range"))?,
                (_, _, Some(text)) => {
                    let amounts: DateComponents =
                        serde_json::from_str(&text).context("Failed to parse --components JSON")?;
                    cal.add_components(&amounts, at, wrap)
                        .context("Composite add leaves the representable range")?
                }
                _ => anyhow::bail!("Pass either --unit with --amount, or --components"),
            };
            json!({ "at": result.seconds() })
        }
        Commands::Ordinality { at, small, large } => {
            let ordinality = cal.try_ordinality(small, large, AbsoluteTime::new(at))?;
            json!({ "ordinality": ordinality })
        }
        Commands::Start { at, unit } => {
            let start = cal
                .start_of(unit, AbsoluteTime::new(at))
                .with_context(|| format!("No start of {unit} at {at}"))?;
            json!({ "at": start.seconds() })
        }
        Commands::Range {
            at,
            small,
            large,
            minimum,
            maximum,
        } => {
            let range = if minimum {
                cal.minimum_range(small)
            } else if maximum {
                cal.maximum_range(small)
            } else {
                let at = at.context("--at is required")?;
                let large = large.context("--large is required")?;
                cal.range(small, large, AbsoluteTime::new(at))
                    .with_context(|| format!("{small} has no range within {large}"))?
            };
            json!({ "start": range.start, "end": range.end })
        }
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

/// Configuration file first, then command-line overrides on top.
fn load_configuration(cli: &Cli) -> Result<CalendarConfiguration> {
    let mut file = match &cli.config {
        Some(path) => {
            let text =
                std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path))?;
            ConfigFile::from_json(&text).with_context(|| format!("Invalid config file: {}", path))?
        }
        None => ConfigFile::default(),
    };

    if let Some(zone) = &cli.zone {
        file.time_zone = Some(zone.clone());
    }
    if let Some(value) = cli.first_weekday {
        file.first_weekday = Some(value);
    }
    if let Some(value) = cli.min_days {
        file.minimum_days_in_first_week = Some(value);
    }
    if let Some(region) = &cli.region {
        file.region = Some(region.clone());
    }

    file.resolve().context("Invalid calendar configuration")
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
