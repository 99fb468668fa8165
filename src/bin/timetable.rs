use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use timetable_engine::{generate_timetable, EngineError, GaConfig, TimetableRequest};
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("cannot write result: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// Population 10, 20 generations
    Quick,
    /// Population 50, 100 generations
    Thorough,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a weekly timetable from a JSON request")]
struct Cli {
    /// Request file ({students, faculty, rooms, constraints}); `-` reads stdin
    #[arg(long, short, default_value = "-")]
    input: PathBuf,

    /// Search effort preset
    #[arg(long, value_enum, default_value_t = Profile::Quick)]
    profile: Profile,

    /// Override the population size
    #[arg(long)]
    population: Option<usize>,

    /// Override the generation cap
    #[arg(long)]
    generations: Option<usize>,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate each generation in parallel
    #[arg(long)]
    parallel: bool,

    /// Pretty-print the result
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn config(&self) -> GaConfig {
        let mut config = match self.profile {
            Profile::Quick => GaConfig::quick(),
            Profile::Thorough => GaConfig::thorough(),
        }
        .with_parallel(self.parallel);
        if let Some(population) = self.population {
            config = config.with_population_size(population);
        }
        if let Some(generations) = self.generations {
            config = config.with_max_generations(generations);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn read_request(&self) -> Result<TimetableRequest, CliError> {
        let text = if self.input.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Io {
                    path: "stdin".into(),
                    source,
                })?;
            buf
        } else {
            std::fs::read_to_string(&self.input).map_err(|source| CliError::Io {
                path: self.input.display().to_string(),
                source,
            })?
        };
        Ok(TimetableRequest::from_json(&text)?)
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let request = cli.read_request()?;
    let output = generate_timetable(&request, &cli.config())?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
