use clap::Parser;
use config::Config;
use injectscan::{cli::Cli, report};
use scanner::ModuleScanner;
use std::process::ExitCode;
use tracing::{debug, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    match run() {
        // Exit status keeps "could not check" (2) apart from both verdicts:
        // a failed scan must never look like a clean one.
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            report::print_failure(&err);
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    // NOTE: The verbosity flag takes precedence over the environment variable
    // for log control. For example, `INJECTSCAN_LOG=warn injectscan -vvv`
    // will still log at the trace level. The environment variable
    // (`INJECTSCAN_LOG`) can only set the log level per crate, not override
    // the verbosity flag.
    let env_filter = EnvFilter::builder()
        .with_env_var("INJECTSCAN_LOG")
        .from_env()?
        .add_directive(cli.verbosity.log_level_filter().as_str().parse()?);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .init();

    // load config
    let config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => {
            let mut candidates = glob::glob("/etc/injectscan/config.d/*.toml")?
                .filter_map(Result::ok)
                .collect::<Vec<_>>();
            candidates.insert(0, "/etc/injectscan/config.toml".into());
            trace!(?candidates, "config file candidates");
            Config::load_multiple(candidates)?
        }
    };
    debug!(?config, ?cli);

    let scanner = ModuleScanner::from_config(&config);
    debug!(signatures = scanner.signatures().len(), "signature set built");

    if cli.all {
        let reports = scanner.sweep()?;
        return Ok(report::print_sweep(&reports));
    }

    let result = match (&cli.maps_file, cli.pid) {
        (Some(path), _) => scanner.scan_maps_file(path)?,
        (None, Some(pid)) => scanner.scan_pid(pid)?,
        (None, None) => scanner.scan()?,
    };
    report::print_scan(&result);
    Ok(result.detected())
}
