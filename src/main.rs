use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use prodsim::io::{load_days, write_outcome, write_outcome_file, ArrivalModel, DemandProfile, ReportFormat, SAMPLE_CSV};
use prodsim::{RunOutcome, SimError, SimulationConfig, SimulationEngine};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prodsim", version, about = "Daily production backlog simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate the days listed in a CSV file
    Run {
        input: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Print a sample input CSV
    Sample,
    /// Simulate synthetic demand with constant capacity
    Generate {
        #[arg(long)]
        days: u64,
        #[arg(long)]
        cycle_time: i64,
        #[arg(long)]
        lines: i64,
        #[arg(long)]
        mean_orders: f64,
        /// Draw arrivals from a Poisson distribution instead of a fixed rate
        #[arg(long)]
        poisson: bool,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    #[arg(long, default_value_t = 0)]
    initial_backlog: u64,
    #[arg(long)]
    max_days: Option<u64>,
    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ReportFormat::Csv,
            Format::Json => ReportFormat::Json,
        }
    }
}

impl RunArgs {
    fn config(&self) -> SimulationConfig {
        let config = SimulationConfig::new().with_initial_backlog(self.initial_backlog);
        match self.max_days {
            Some(days) => config.with_max_days(days),
            None => config,
        }
    }

    fn emit(&self, outcome: &RunOutcome) -> Result<(), SimError> {
        match &self.output {
            Some(path) => write_outcome_file(path, outcome, self.format.into()),
            None => write_outcome(std::io::stdout().lock(), outcome, self.format.into()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Sample => {
            print!("{}", SAMPLE_CSV);
        }
        Command::Run { input, run } => {
            let records = load_days(&input)?;
            let mut engine = SimulationEngine::new(&run.config());
            for record in &records {
                if engine.limit_reached() {
                    break;
                }
                let result = match &record.input {
                    Ok(day) => engine.step(day).map(|_| ()),
                    Err(err) => {
                        engine.skip(err);
                        Err(err.clone())
                    }
                };
                if let Err(err) = result {
                    if !err.is_recoverable() {
                        return Err(err.into());
                    }
                }
            }
            run.emit(&engine.finish())?;
        }
        Command::Generate {
            days,
            cycle_time,
            lines,
            mean_orders,
            poisson,
            seed,
            run,
        } => {
            let model = if poisson {
                ArrivalModel::Poisson
            } else {
                ArrivalModel::Fixed
            };
            let inputs = DemandProfile::new(cycle_time, lines, mean_orders)
                .with_arrival_model(model)
                .with_seed(seed)
                .generate(days)?;
            if inputs.is_empty() {
                warn!("No days to simulate");
            }
            let outcome = SimulationEngine::new(&run.config()).run(&inputs);
            run.emit(&outcome)?;
        }
    }
    Ok(())
}
