use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use log::info;

use u_delivery::input::read_stops_from_stdin;
use u_delivery::optimizer::{OptimizerConfig, RouteOptimizer};
use u_delivery::report::{RoutePlot, Summary};

fn cli() -> Command {
    Command::new("route-planner")
        .about("Plans the shortest delivery round trip, visiting stops by priority")
        .arg(
            arg!(--"log-level" [LEVEL] "Log level (error, warn, info, debug, trace)")
                .default_value("warn")
                .value_parser(["error", "warn", "info", "debug", "trace"]),
        )
        .arg(
            arg!(--"deadline-ms" [MS] "Abort the search after this many milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"max-tours" [TOURS] "Abort the search after this many candidate tours")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(arg!(--parallel "Search on all cores").action(ArgAction::SetTrue))
        .arg(
            arg!(--json "Print the result and drawing primitives as JSON")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .try_init()
        .map_err(|e| anyhow!("logger init failed: {e}"))?;

    let mut config = OptimizerConfig::new().with_parallel(matches.get_flag("parallel"));
    if let Some(&ms) = matches.get_one::<u64>("deadline-ms") {
        config = config.with_deadline(Duration::from_millis(ms));
    }
    if let Some(&tours) = matches.get_one::<u64>("max-tours") {
        config = config.with_max_tours(tours);
    }
    info!("config: {config:?}");

    let stops = read_stops_from_stdin()?;
    let result = RouteOptimizer::new(config).optimize(&stops)?;

    if matches.get_flag("json") {
        let plot = RoutePlot::from_result(&result);
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "result": result,
                "plot": plot,
            }))?
        );
    } else {
        println!("\n{}", Summary(&result));
    }

    Ok(())
}
