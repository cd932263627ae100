//! CLI entry point for the fleet trip auditor.
//!
//! Provides subcommands for computing trip KPIs, running the trip completion
//! gate, evaluating diesel records against fleet norms, and listing flagged
//! cost entries.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use fleet_trip_auditor::{
    completion::TripBoard,
    diesel::{
        aggregate::FleetSummary,
        evaluate::evaluate_all,
        filter::{DieselFilter, ProbeStatusFilter},
    },
    filters::TripFilter,
    flags::{all_flagged_costs, should_auto_complete},
    kpi::TripKpis,
    output::{append_evaluated_records, print_json},
    snapshot::FleetSnapshot,
    trip_summary::TripSummary,
    types::{Currency, Trip},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fleet_trip_auditor")]
#[command(about = "A tool to audit trip costs and diesel efficiency for a trucking fleet", long_about = None)]
struct Cli {
    /// Fleet snapshot JSON exported by the host application
    #[arg(short, long, global = true, default_value = "fleet.json")]
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Trip selection criteria shared by the trip-side subcommands.
#[derive(Args)]
struct TripFilterArgs {
    /// Only trips starting on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only trips ending on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Only trips for this client
    #[arg(long)]
    client: Option<String>,

    /// Only trips for this driver
    #[arg(long)]
    driver: Option<String>,

    /// Only trips invoiced in this currency (USD or ZAR)
    #[arg(long)]
    currency: Option<String>,
}

impl TripFilterArgs {
    fn into_filter(self) -> Result<TripFilter> {
        Ok(TripFilter {
            start_date: self.from,
            end_date: self.to,
            client: self.client,
            driver: self.driver,
            currency: self.currency.map(|c| parse_currency(&c)).transpose()?,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute financial KPIs for one trip, or every matching trip
    Kpi {
        /// Trip to report on; omit for all trips
        #[arg(short, long)]
        trip_id: Option<String>,

        #[command(flatten)]
        filter: TripFilterArgs,
    },
    /// Aggregate matching trips into a fleet-wide summary
    Summary {
        #[command(flatten)]
        filter: TripFilterArgs,
    },
    /// Request the active → completed transition for a trip
    Complete {
        #[arg(short, long)]
        trip_id: String,

        /// Actor recorded on the completion
        #[arg(short, long, default_value = "User")]
        actor: String,

        /// Write the mutated snapshot back to disk on success
        #[arg(short, long, default_value_t = false)]
        write: bool,
    },
    /// Evaluate diesel records and print the fleet summary
    Evaluate {
        /// Only records for this fleet vehicle
        #[arg(long)]
        fleet: Option<String>,

        /// Only records for this driver
        #[arg(long)]
        driver: Option<String>,

        /// Only records on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Only records in this currency (USD or ZAR)
        #[arg(long)]
        currency: Option<String>,

        /// Only records in this probe category
        #[arg(long, value_enum)]
        probe_status: Option<ProbeStatusFilter>,

        /// CSV file to append evaluated rows to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List flagged cost entries across the whole fleet
    Flagged,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/fleet_trip_auditor.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fleet_trip_auditor.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let snapshot = FleetSnapshot::load(&cli.snapshot)?;

    match cli.command {
        Commands::Kpi { trip_id, filter } => {
            run_kpi(&snapshot, trip_id.as_deref(), &filter.into_filter()?)?;
        }
        Commands::Summary { filter } => run_summary(&snapshot, &filter.into_filter()?)?,
        Commands::Complete {
            trip_id,
            actor,
            write,
        } => run_complete(snapshot, &cli.snapshot, &trip_id, &actor, write)?,
        Commands::Evaluate {
            fleet,
            driver,
            date,
            currency,
            probe_status,
            output,
        } => {
            let currency = currency.map(|c| parse_currency(&c)).transpose()?;
            let filter = DieselFilter {
                fleet_number: fleet,
                driver,
                date,
                currency,
                probe_status,
            };
            run_evaluate(&snapshot, &filter, output.as_deref())?;
        }
        Commands::Flagged => run_flagged(&snapshot)?,
    }

    Ok(())
}

fn parse_currency(value: &str) -> Result<Currency> {
    match value.to_ascii_uppercase().as_str() {
        "USD" => Ok(Currency::Usd),
        "ZAR" => Ok(Currency::Zar),
        other => anyhow::bail!("unsupported currency {other:?}, expected USD or ZAR"),
    }
}

/// Resolves the trips a trip-side subcommand operates on. A `--trip-id`
/// combined with filters the trip fails is rejected rather than silently
/// ignoring the filters.
fn select_trips<'a>(
    trips: &'a [Trip],
    trip_id: Option<&str>,
    filter: &TripFilter,
) -> Result<Vec<&'a Trip>> {
    match trip_id {
        Some(id) => {
            let trip = trips
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| anyhow::anyhow!("trip {id} not found in snapshot"))?;
            if !filter.matches(trip) {
                anyhow::bail!("trip {id} does not match the supplied filters");
            }
            Ok(vec![trip])
        }
        None => Ok(filter.apply(trips)),
    }
}

#[tracing::instrument(skip(snapshot, filter))]
fn run_kpi(snapshot: &FleetSnapshot, trip_id: Option<&str>, filter: &TripFilter) -> Result<()> {
    for trip in select_trips(&snapshot.trips, trip_id, filter)? {
        info!(trip_id = %trip.id, route = %trip.route, "Trip KPIs");
        print_json(&TripKpis::from_trip(trip))?;
    }
    Ok(())
}

#[tracing::instrument(skip(snapshot, filter))]
fn run_summary(snapshot: &FleetSnapshot, filter: &TripFilter) -> Result<()> {
    let matched: Vec<Trip> = filter.apply(&snapshot.trips).into_iter().cloned().collect();
    let summary = TripSummary::from_trips(&matched);

    info!(
        total = snapshot.trips.len(),
        matched = matched.len(),
        blocked = summary.trips_with_unresolved_flags.len(),
        "Trip summary computed"
    );
    print_json(&summary)?;
    Ok(())
}

#[tracing::instrument(skip(snapshot, snapshot_path))]
fn run_complete(
    snapshot: FleetSnapshot,
    snapshot_path: &Path,
    trip_id: &str,
    actor: &str,
    write: bool,
) -> Result<()> {
    let FleetSnapshot {
        trips,
        diesel_records,
        norms,
        evaluator_config,
    } = snapshot;

    let mut board = TripBoard::new(trips);

    if let Some(trip) = board.get(trip_id) {
        if should_auto_complete(trip) {
            info!(trip_id, "All flags resolved; trip was eligible for auto-completion");
        }
    }

    match board.complete_trip(trip_id, actor, Utc::now()) {
        Ok(()) => {
            info!(trip_id, actor, "Completion accepted");
        }
        Err(e) => {
            error!(trip_id, reason = %e, "Completion rejected");
            anyhow::bail!(e);
        }
    }

    if write {
        let updated = FleetSnapshot {
            trips: board.into_trips(),
            diesel_records,
            norms,
            evaluator_config,
        };
        updated.save(snapshot_path)?;
        info!(path = %snapshot_path.display(), "Snapshot written back");
    }
    Ok(())
}

#[tracing::instrument(skip(snapshot, filter))]
fn run_evaluate(
    snapshot: &FleetSnapshot,
    filter: &DieselFilter,
    output: Option<&str>,
) -> Result<()> {
    let norms = snapshot.norm_book();
    let config = &snapshot.evaluator_config;

    let evals = evaluate_all(&snapshot.diesel_records, &norms, config, &snapshot.trips);
    let filtered = filter.apply(&evals);

    info!(
        total = evals.len(),
        matched = filtered.len(),
        "Diesel records evaluated"
    );

    let summary = FleetSummary::from_records(filtered.iter().copied());
    if summary.records_needing_probe_verification > 0 {
        warn!(
            count = summary.records_needing_probe_verification,
            "Fills awaiting probe verification"
        );
    }
    print_json(&summary)?;

    if let Some(path) = output {
        append_evaluated_records(path, &filtered)?;
        info!(path, rows = filtered.len(), "Evaluated rows appended");
    }
    Ok(())
}

#[tracing::instrument(skip(snapshot))]
fn run_flagged(snapshot: &FleetSnapshot) -> Result<()> {
    let flagged = all_flagged_costs(&snapshot.trips);
    info!(count = flagged.len(), "Flagged cost entries");
    print_json(&flagged)?;
    Ok(())
}
