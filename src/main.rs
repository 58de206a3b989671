//! lanreg - LAN865x register access
//!
//! Finds the network interface driven by `lan865x` and reads or writes one
//! MAC-PHY register through the driver's ethtool register extension.
//!
//! # Flow
//!
//! 1. Parse the command line; bad usage exits with status 1
//! 2. Find the interface (or take the one given with `--interface`)
//! 3. Check the driver binding and issue a single register request
//! 4. Print the result; any failure exits with status 1

mod cli;
mod commands;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use commands::CommandError;
use lanreg_core::{ChannelOpener, DriverName, IfName, RegisterAccessor};
use lanreg_linux_net::{EthtoolOpener, Locator, LocatorConfig};
use log::LevelFilter;
use std::io::{self, Write};
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return ExitCode::from(report_usage_error(&e)),
    };

    // Initialize logger
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = log_level(cli.verbose) {
        builder.filter_level(level);
    }
    builder.init();

    let mut stdout = io::stdout().lock();
    ExitCode::from(dispatch(cli, EthtoolOpener, LocatorConfig::new(), &mut stdout))
}

/// Log level selected by `-v`, overriding `RUST_LOG`
fn log_level(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None, // default (info)
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Run a parsed command line and return the exit status
fn dispatch<O, W>(cli: Cli, opener: O, locator_config: LocatorConfig, out: &mut W) -> u8
where
    O: ChannelOpener,
    W: Write,
{
    match run(cli, opener, locator_config, out) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            EXIT_FAILURE
        }
    }
}

fn run<O, W>(
    cli: Cli,
    opener: O,
    locator_config: LocatorConfig,
    out: &mut W,
) -> Result<(), CommandError>
where
    O: ChannelOpener,
    W: Write,
{
    match cli.command {
        Commands::List => {
            commands::list_registers(out)?;
            Ok(())
        }
        Commands::Read { address, decode } => {
            let ifname = resolve_interface(cli.interface, &cli.driver, locator_config)?;
            let accessor = RegisterAccessor::new(opener).with_expected_driver(cli.driver);
            commands::read::run_read(&accessor, &ifname, address, decode, out)
        }
        Commands::Write { address, value } => {
            let ifname = resolve_interface(cli.interface, &cli.driver, locator_config)?;
            let accessor = RegisterAccessor::new(opener).with_expected_driver(cli.driver);
            commands::write::run_write(&accessor, &ifname, address, value, out)
        }
    }
}

/// Use the interface given on the command line, or search for one
fn resolve_interface(
    interface: Option<IfName>,
    driver: &DriverName,
    locator_config: LocatorConfig,
) -> Result<IfName, CommandError> {
    let ifname = match interface {
        Some(ifname) => ifname,
        None => {
            let locator = Locator::new(locator_config);
            match locator.locate(driver) {
                Ok(ifname) => ifname,
                Err(e) => {
                    log_candidates(&locator);
                    return Err(e.into());
                }
            }
        }
    };

    log::info!("Using interface: {}", ifname);
    Ok(ifname)
}

/// Show what the search looked at
fn log_candidates(locator: &Locator) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    match locator.candidates() {
        Ok(candidates) if candidates.is_empty() => log::debug!("No candidate interfaces"),
        Ok(candidates) => {
            for candidate in candidates {
                log::debug!(
                    "  {}: {}",
                    candidate.name,
                    candidate.module.as_deref().unwrap_or("(no driver module)")
                );
            }
        }
        Err(e) => log::debug!("{}", e),
    }
}

/// Message for an unknown subcommand
fn unknown_command(err: &clap::Error) -> Option<String> {
    if err.kind() != ErrorKind::InvalidSubcommand {
        return None;
    }
    match err.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(name)) => Some(format!("Unknown command: {}", name)),
        _ => Some("Unknown command".to_string()),
    }
}

/// Print a parse error and pick the exit status
///
/// Help and version requests succeed; everything else is a usage error.
fn report_usage_error(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            match unknown_command(err) {
                Some(message) => {
                    eprintln!("{}", message);
                    eprintln!("{}", Cli::command().render_usage());
                }
                None => {
                    let _ = err.print();
                }
            }
            EXIT_FAILURE
        }
    }
}
