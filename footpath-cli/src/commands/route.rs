//! Route command - one-shot walking route between two coordinates.

use std::time::Duration;

use clap::Args;
use footpath::guidance::{format_distance, format_duration};
use footpath::{DirectRouter, OsrmRouter, ReqwestHttpClient, Route, Router};

use super::common::parse_coordinate;
use crate::error::CliError;

/// Arguments for the route command.
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Origin as LAT,LON decimal degrees.
    #[arg(long)]
    pub from: String,

    /// Destination as LAT,LON decimal degrees.
    #[arg(long)]
    pub to: String,

    /// Skip the routing service and synthesize a direct line.
    #[arg(long)]
    pub offline: bool,

    /// Routing request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Base URL of the OSRM instance to query.
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Run the route command.
pub fn run(args: RouteArgs) -> Result<(), CliError> {
    let origin = parse_coordinate(&args.from)?;
    let destination = parse_coordinate(&args.to)?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;

    let route = if args.offline {
        runtime.block_on(DirectRouter.compute_route(origin, destination))
    } else {
        let client = ReqwestHttpClient::new().map_err(|e| CliError::Http(e.to_string()))?;
        let mut router =
            OsrmRouter::new(client).with_timeout(Duration::from_secs(args.timeout_secs));
        if let Some(base_url) = &args.base_url {
            router = router.with_base_url(base_url);
        }
        runtime.block_on(router.compute_route(origin, destination))
    };

    print_route(&route);
    Ok(())
}

fn print_route(route: &Route) {
    println!(
        "Route: {} in {} ({} points, {} steps)",
        format_distance(route.total_distance_m),
        format_duration(route.total_duration_s),
        route.path.len(),
        route.steps.len(),
    );

    if route.is_fallback() {
        println!("Note: routing service unavailable, showing a direct line.");
    }

    for (index, step) in route.steps.iter().enumerate() {
        println!(
            "  {:>2}. {} ({})",
            index + 1,
            step.instruction,
            format_distance(step.distance_m),
        );
    }
}
