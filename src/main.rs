use std::{io, process};

use aerospike::{Client, ClientPolicy};
use aerospike_profile_demo::{
    cli::{Command, Config},
    errors::{report, Result},
    Demo,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const FAILURE_EXIT_CODE: i32 = 1;

const DEFAULT_LOG_FILTER: &str = "info";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`] when it is unset or invalid.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_logger() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter(directives.as_deref()))
        .init();
}

fn run(config: &Config) -> Result<()> {
    info!(host = %config.host, port = config.port, "connecting");
    let client = Client::new(&ClientPolicy::default(), &config.seed())?;

    let stdout = io::stdout();
    let result = Demo::new(&client).run(&mut stdout.lock());

    client.close()?;
    result
}

fn main() {
    init_logger();

    let command = Command::from_args(std::env::args_os()).unwrap_or_else(|err| err.exit());
    let config = match command {
        Command::Usage(usage) => {
            println!("{usage}");
            return;
        }
        Command::Run(config) => config,
    };

    if let Err(err) = run(&config) {
        eprint!("{}", report(&err));
        process::exit(FAILURE_EXIT_CODE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_info_by_default() {
        assert_eq!(env_filter(None).to_string(), "info");
    }

    #[test]
    fn rust_log_overrides_default() {
        assert_eq!(env_filter(Some("debug")).to_string(), "debug");
    }
}
