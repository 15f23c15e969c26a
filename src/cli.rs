//! Command line handling.

use std::ffi::OsString;

use aerospike::Host;
use clap::{App, Arg, ErrorKind};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Connection settings taken from the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Seed host for the client.
    #[must_use]
    pub fn seed(&self) -> Vec<Host> {
        vec![Host::new(&self.host, self.port)]
    }
}

/// What the program was asked to do.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Run(Config),
    /// Print the contained usage text and exit.
    Usage(String),
}

fn app() -> App<'static, 'static> {
    App::new("profile-demo")
        .about("Registers a Lua UDF, indexes user profiles and queries them back")
        .arg(
            Arg::with_name("host")
                .short("h")
                .long("host")
                .value_name("host")
                .help("Server hostname (default: 127.0.0.1)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("port")
                .short("p")
                .long("port")
                .value_name("port")
                .help("Server port (default: 3000)")
                .takes_value(true)
                .validator(validate_port),
        )
        .arg(
            Arg::with_name("usage")
                .short("u")
                .long("usage")
                .help("Print usage"),
        )
}

fn validate_port(value: String) -> Result<(), String> {
    match value.parse::<u16>() {
        Ok(0) => Err("port must be between 1 and 65535".to_owned()),
        Ok(_) => Ok(()),
        Err(err) => Err(format!("invalid port {value:?}: {err}")),
    }
}

impl Command {
    /// Parses the process arguments; the first item is the binary name.
    ///
    /// `--help` and invalid arguments are reported as [`clap::Error`], which the caller
    /// usually hands to [`clap::Error::exit`].
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut app = app();
        let matches = app.get_matches_from_safe_borrow(args)?;

        if matches.is_present("usage") {
            let mut usage = Vec::new();
            app.write_help(&mut usage)?;
            return Ok(Self::Usage(String::from_utf8_lossy(&usage).into_owned()));
        }

        let host = matches.value_of("host").unwrap_or(DEFAULT_HOST).to_owned();
        let port = match matches.value_of("port") {
            Some(port) => port.parse().map_err(|err| {
                clap::Error::with_description(
                    &format!("invalid port {port:?}: {err}"),
                    ErrorKind::ValueValidation,
                )
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self::Run(Config { host, port }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Command::from_args(std::iter::once("profile-demo").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Config::default()));
    }

    #[test]
    fn short_flags() {
        let command = parse(&["-h", "db.example.com", "-p", "3100"]).unwrap();
        assert_eq!(
            command,
            Command::Run(Config {
                host: "db.example.com".to_owned(),
                port: 3100,
            })
        );
    }

    #[test]
    fn long_flags() {
        let command = parse(&["--host=10.0.0.7", "--port", "4000"]).unwrap();
        assert_eq!(
            command,
            Command::Run(Config {
                host: "10.0.0.7".to_owned(),
                port: 4000,
            })
        );
    }

    #[test]
    fn usage_prints_options() {
        match parse(&["-u"]).unwrap() {
            Command::Usage(text) => {
                assert!(text.contains("--host"), "{text}");
                assert!(text.contains("--port"), "{text}");
                assert!(text.contains("--usage"), "{text}");
            }
            other => panic!("expected usage, got {other:?}"),
        }
    }

    #[test]
    fn long_help_flag() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::HelpDisplayed);
    }

    #[test]
    fn accepts_port_range_ends() {
        for port in [1, u16::MAX] {
            let arg = port.to_string();
            let command = parse(&["-p", &arg]).unwrap();
            assert_eq!(
                command,
                Command::Run(Config {
                    host: DEFAULT_HOST.to_owned(),
                    port,
                })
            );
        }
    }

    #[test]
    fn rejects_bad_ports() {
        for port in ["0", "65536", "abc"] {
            let err = parse(&["--port", port]).unwrap_err();
            assert_eq!(err.kind, ErrorKind::ValueValidation, "port {port}");
        }
    }

    #[test]
    fn rejects_unknown_flags() {
        let err = parse(&["--namespace", "bar"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownArgument);
    }

    #[test]
    fn seed_host() {
        let config = Config {
            host: "db".to_owned(),
            port: 3100,
        };
        assert_eq!(config.seed(), vec![Host::new("db", 3100)]);
    }
}
