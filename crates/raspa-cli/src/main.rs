//! `raspa-converge`: ejecuta el workflow de convergencia RASPA con el
//! executor local.
//!
//! Códigos de salida: 0 ok, 2 uso, 3 configuración, 4 ejecución, 5 otros.
mod args;
mod interrupt;

use log::{error, info};
use raspaflow::config::{init_dotenv, parse_max_iterations};
use raspaflow::{load_inputs, run_workflow, write_output, AppConfig, AppError, CancelFlag};
use tracing_subscriber::EnvFilter;

use crate::args::{Command, RunArgs, USAGE};

fn init_logging(default_filter: &str, verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_new(default_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // El subscriber fmt instala también el puente `log` -> `tracing`.
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(std::io::stderr)
                                     .with_target(false)
                                     .try_init();
}

async fn run(args: RunArgs) -> Result<(), AppError> {
    let max_iterations = args.max_iterations.as_deref().map(parse_max_iterations).transpose()?;
    let mut config = AppConfig::from_env()?.with_max_iterations(max_iterations);
    if let Some(dir) = &args.scratch {
        config = config.with_scratch_dir(dir);
    }
    init_logging(&config.log_filter, args.verbosity);

    let inputs = load_inputs(&args.input)?;
    let cancel = CancelFlag::new();
    let interrupts = interrupt::ctrl_c_channel();
    let work = run_workflow(inputs, &config, cancel.clone());
    let output = interrupt::run_interruptible(work, cancel, interrupts).await
                                                                       .ok_or(AppError::Interrupted)??;
    match &args.output {
        Some(path) => {
            write_output(path, &output)?;
            info!("output written to {}", path.display());
        }
        None => println!("{}", raspaflow::launcher::render_output(&output)?),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_dotenv();
    let argv: Vec<String> = std::env::args().collect();
    let command = match args::parse(&argv) {
        Ok(cmd) => cmd,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            std::process::exit(2);
        }
    };
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Run(run_args) => {
            if let Err(e) = run(run_args).await {
                error!("{e}");
                eprintln!("error: {e}");
                std::process::exit(e.exit_code());
            }
        }
    }
}
