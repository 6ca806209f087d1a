//! Guide command - live guidance session driven by fix events on stdin.
//!
//! # Event protocol
//!
//! One event per line:
//!
//! ```text
//! POS <lat> <lon> [accuracy_m]    position fix
//! HDG <degrees>                   compass heading
//! LOST                            provider lost the signal
//! DISMISS                         dismiss the arrival state
//! QUIT                            end the session and exit
//! ```
//!
//! After each event the current guidance line is printed: phase, distance,
//! walking ETA, arrow rotation, and the active instruction.

use std::time::Duration;

use clap::Args;
use footpath::guidance::{
    format_distance, format_duration, rotation_degrees, walking_eta_seconds,
};
use footpath::{
    Coordinate, DirectRouter, FixFailure, HeadingSample, NavigationService, OsrmRouter,
    PositionFix, ReqwestHttpClient, Router, SessionPhase,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::common::parse_coordinate;
use crate::error::CliError;

/// Arguments for the guide command.
#[derive(Debug, Args)]
pub struct GuideArgs {
    /// Destination as LAT,LON decimal degrees.
    #[arg(long)]
    pub to: String,

    /// Origin as LAT,LON. When omitted, the first POS event starts the
    /// session.
    #[arg(long)]
    pub from: Option<String>,

    /// Skip the routing service and navigate along a direct line.
    #[arg(long)]
    pub offline: bool,

    /// Routing request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Base URL of the OSRM instance to query.
    #[arg(long)]
    pub base_url: Option<String>,
}

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum InputEvent {
    Position(f64, f64, Option<f64>),
    Heading(f64),
    Lost,
    Dismiss,
    Quit,
    Blank,
    Unknown,
}

/// Run the guide command.
pub fn run(args: GuideArgs) -> Result<(), CliError> {
    let destination = parse_coordinate(&args.to)?;
    let origin = args.from.as_deref().map(parse_coordinate).transpose()?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;

    if args.offline {
        runtime.block_on(drive(
            NavigationService::new(DirectRouter),
            origin,
            destination,
        ))
    } else {
        let client = ReqwestHttpClient::new().map_err(|e| CliError::Http(e.to_string()))?;
        let mut router =
            OsrmRouter::new(client).with_timeout(Duration::from_secs(args.timeout_secs));
        if let Some(base_url) = &args.base_url {
            router = router.with_base_url(base_url);
        }
        runtime.block_on(drive(
            NavigationService::new(router),
            origin,
            destination,
        ))
    }
}

async fn drive<R: Router + 'static>(
    service: NavigationService<R>,
    origin: Option<Coordinate>,
    destination: Coordinate,
) -> Result<(), CliError> {
    if let Some(origin) = origin {
        service.start_session(origin, destination);
        println!("Session started towards {}.", destination);
    } else {
        println!(
            "Waiting for the first POS event to start towards {}.",
            destination
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| CliError::Io(e.to_string()))?
    {
        match parse_line(&line) {
            InputEvent::Position(lat, lon, accuracy) => {
                if service.phase() == SessionPhase::Idle {
                    match Coordinate::new(lat, lon) {
                        Ok(origin) => {
                            service.start_session(origin, destination);
                            println!("Session started towards {}.", destination);
                        }
                        Err(e) => println!("Ignoring position: {}", e),
                    }
                } else {
                    let mut fix = PositionFix::new(lat, lon);
                    if let Some(accuracy) = accuracy {
                        fix = fix.with_accuracy(accuracy);
                    }
                    service.on_fix(fix);
                }
                print_status(&service);
            }
            InputEvent::Heading(degrees) => {
                service.on_heading(HeadingSample::new(degrees));
                print_status(&service);
            }
            InputEvent::Lost => {
                service.on_unavailable(FixFailure::NoSignal);
                print_status(&service);
            }
            InputEvent::Dismiss => {
                service.dismiss_arrival();
                print_status(&service);
            }
            InputEvent::Quit => break,
            InputEvent::Blank => {}
            InputEvent::Unknown => {
                println!("Unrecognized event: {}", line.trim());
            }
        }
    }

    service.end_session();
    println!("Session ended.");
    Ok(())
}

fn parse_line(line: &str) -> InputEvent {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return InputEvent::Blank;
    };

    match keyword.to_ascii_uppercase().as_str() {
        "POS" => {
            let lat = tokens.next().and_then(|t| t.parse().ok());
            let lon = tokens.next().and_then(|t| t.parse().ok());
            let accuracy = tokens.next().and_then(|t| t.parse().ok());
            match (lat, lon) {
                (Some(lat), Some(lon)) => InputEvent::Position(lat, lon, accuracy),
                _ => InputEvent::Unknown,
            }
        }
        "HDG" => match tokens.next().and_then(|t| t.parse().ok()) {
            Some(degrees) => InputEvent::Heading(degrees),
            None => InputEvent::Unknown,
        },
        "LOST" => InputEvent::Lost,
        "DISMISS" => InputEvent::Dismiss,
        "QUIT" => InputEvent::Quit,
        _ => InputEvent::Unknown,
    }
}

fn print_status<R: Router + 'static>(service: &NavigationService<R>) {
    let snapshot = service.snapshot();

    let mut parts = vec![format!("[{}]", snapshot.phase)];

    if let Some(distance) = snapshot.distance_to_destination_m {
        parts.push(format_distance(distance));
        parts.push(format!(
            "ETA {}",
            format_duration(walking_eta_seconds(distance))
        ));
    }

    if let (Some(position), Some(destination)) =
        (snapshot.current_position, snapshot.destination)
    {
        parts.push(format!(
            "arrow {:.0}°",
            rotation_degrees(position, destination, snapshot.heading_degrees)
        ));
    }

    if let Some(step) = snapshot.active_step() {
        parts.push(step.instruction.clone());
    }

    if snapshot.route_is_fallback() {
        parts.push("(direct line)".to_string());
    }

    if let Some(failure) = snapshot.fix_failure {
        parts.push(format!("({})", failure));
    }

    if snapshot.arrived {
        parts.push("- type DISMISS to finish".to_string());
    }

    println!("{}", parts.join(" · "));
}
