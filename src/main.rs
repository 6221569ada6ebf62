use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use vehitax::application::service::PaymentService;
use vehitax::domain::ledger::RecordId;
use vehitax::domain::money::Money;
use vehitax::domain::ports::LedgerBox;
use vehitax::domain::vehicle::{VehicleForm, VehicleTaxRecord};
use vehitax::infrastructure::in_memory::InMemoryLedger;
use vehitax::infrastructure::sqlite::SqliteLedger;
use vehitax::interfaces::csv::payment_reader::PaymentReader;
use vehitax::interfaces::receipt::{export_receipt, render_receipt};
use vehitax::interfaces::report::{OutputFormat, ReportWriter};

#[derive(Parser)]
#[command(author, version, about = "Record vehicle tax payments", long_about = None)]
struct Cli {
    /// Path to the SQLite payment ledger.
    #[arg(long, env = "VEHITAX_DB", default_value = "pajak.db", global = true)]
    db_path: PathBuf,

    /// Keep the ledger in memory for this run only.
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the penalty and total due without taking payment.
    Quote(VehicleArgs),
    /// Settle a payment, record it and print the receipt.
    Pay {
        #[command(flatten)]
        vehicle: VehicleArgs,
        /// Amount handed over by the payer.
        #[arg(long)]
        tendered: String,
        /// Also write the receipt to this file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Record every payment in a CSV file.
    Import {
        /// Input payments CSV file.
        input: PathBuf,
    },
    /// List recorded payments, newest first.
    History {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print (and optionally export) the receipt of a recorded payment.
    Receipt {
        id: i64,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Payment statistics.
    Stats {
        #[arg(long, value_enum, default_value_t = StatsBy::Year)]
        by: StatsBy,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

/// Raw vehicle fields; parsed and validated by the library.
#[derive(Args)]
struct VehicleArgs {
    #[arg(long)]
    plate: String,
    #[arg(long)]
    vehicle_type: String,
    #[arg(long)]
    bbnkb: String,
    #[arg(long)]
    pajak_pokok: String,
    #[arg(long)]
    opsen: String,
    #[arg(long)]
    swdkllj: String,
    #[arg(long, default_value = "0")]
    months_late: String,
}

impl VehicleArgs {
    fn into_record(self) -> vehitax::error::Result<VehicleTaxRecord> {
        let form = VehicleForm {
            plate: self.plate,
            vehicle_type: self.vehicle_type,
            bbnkb: self.bbnkb,
            pajak_pokok: self.pajak_pokok,
            opsen: self.opsen,
            swdkllj: self.swdkllj,
            months_late: self.months_late,
        };
        VehicleTaxRecord::try_from(&form)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatsBy {
    Year,
    Type,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn open_ledger(db_path: &Path, in_memory: bool) -> vehitax::error::Result<LedgerBox> {
    if in_memory {
        debug!("using in-memory ledger");
        Ok(Box::new(InMemoryLedger::new()))
    } else {
        Ok(Box::new(SqliteLedger::open(db_path)?))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let Cli {
        db_path,
        in_memory,
        command,
    } = Cli::parse();

    // Quoting never touches the ledger file.
    let ledger = if matches!(command, Command::Quote(_)) {
        open_ledger(&db_path, true)
    } else {
        open_ledger(&db_path, in_memory)
    }
    .into_diagnostic()?;
    let service = PaymentService::new(ledger);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Quote(vehicle) => {
            let assessment = service.quote(&vehicle.into_record().into_diagnostic()?);
            writeln!(out, "PENALTY      : Rp {}", assessment.penalty.truncated()).into_diagnostic()?;
            writeln!(out, "TOTAL DUE    : Rp {}", assessment.total.truncated()).into_diagnostic()?;
        }
        Command::Pay {
            vehicle,
            tendered,
            export,
        } => {
            let record = vehicle.into_record().into_diagnostic()?;
            let tendered = Money::parse("tendered", &tendered).into_diagnostic()?;
            let receipt = service.process_payment(record, tendered).await.into_diagnostic()?;

            write!(out, "{}", render_receipt(&receipt)).into_diagnostic()?;
            if let Some(path) = export {
                export_receipt(&receipt, &path).into_diagnostic()?;
            }
        }
        Command::Import { input } => {
            let file = File::open(input).into_diagnostic()?;
            let (mut accepted, mut rejected) = (0usize, 0usize);
            for (line, payment) in PaymentReader::new(file).payments() {
                let outcome = match payment {
                    Ok((record, tendered)) => service.process_payment(record, tendered).await.map(|_| ()),
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(()) => accepted += 1,
                    Err(e) => {
                        warn!("Rejected payment on row {line}: {e}");
                        rejected += 1;
                    }
                }
            }
            writeln!(out, "Imported {accepted} payments, rejected {rejected}").into_diagnostic()?;
        }
        Command::History { format } => {
            let entries = service.history().await.into_diagnostic()?;
            ReportWriter::new(&mut out, format.into())
                .write_history(&entries)
                .into_diagnostic()?;
        }
        Command::Receipt { id, export } => {
            let receipt = service.require_receipt(RecordId(id)).await.into_diagnostic()?;
            write!(out, "{}", render_receipt(&receipt)).into_diagnostic()?;
            if let Some(path) = export {
                export_receipt(&receipt, &path).into_diagnostic()?;
            }
        }
        Command::Stats { by, format } => {
            let mut writer = ReportWriter::new(&mut out, format.into());
            match by {
                StatsBy::Year => {
                    let report = service.yearly_report().await.into_diagnostic()?;
                    writer.write_yearly(&report).into_diagnostic()?;
                }
                StatsBy::Type => {
                    let counts = service.vehicle_type_counts().await.into_diagnostic()?;
                    writer.write_vehicle_types(&counts).into_diagnostic()?;
                }
            }
        }
    }

    Ok(())
}
