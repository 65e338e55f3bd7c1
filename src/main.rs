//! Stride - headless dash simulation
//!
//! Drives a simulated actor through one scripted dash per direction mode on a
//! fixed-step clock and logs a JSON report for each.
//!
//! Usage: `stride [settings.toml]` or `stride --init [settings.toml]` to write
//! the default settings file.

mod settings;

use std::path::PathBuf;

use anyhow::Result;
use glam::{Vec2, Vec3};
use serde::Serialize;
use stride_core::SimClock;
use stride_game::{DashAbility, DashInput, DashMode, MovementMode, PointerCamera, SimActor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use settings::DemoSettings;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Outcome of one scripted dash
#[derive(Debug, Serialize)]
struct DashReport {
    mode: DashMode,
    origin: Vec3,
    started: bool,
    destination: Option<Vec3>,
    final_position: Vec3,
    fixed_steps: u32,
    dash_steps: u32,
    interrupted: bool,
    cooldown_remaining: f32,
    cooldown_total: f32,
    cooldown_fill: f32,
    simulated_time: f64,
}

/// Script for one run
struct Scenario {
    mode: DashMode,
    input: DashInput,
    external_direction: Option<Vec3>,
    interrupt_after: Option<u32>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Stride dash simulation...");

    let mut init = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--init" {
            init = true;
        } else {
            path = Some(PathBuf::from(arg));
        }
    }

    if init {
        let written = DemoSettings::default().save(path.as_deref())?;
        info!("Wrote default settings to {:?}", written);
        return Ok(());
    }

    let settings = DemoSettings::load(path.as_deref());
    for scenario in scenarios() {
        let report = run(&settings, &scenario);
        info!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}

fn scenarios() -> Vec<Scenario> {
    let camera = PointerCamera::looking_at(Vec3::new(0.0, 12.0, -8.0), Vec3::ZERO);
    let pointer_ray = camera.screen_ray(Vec2::new(960.0, 260.0), VIEWPORT);

    let plain = |mode| Scenario {
        mode,
        input: DashInput::pressed(),
        external_direction: None,
        interrupt_after: None,
    };

    vec![
        plain(DashMode::Fixed),
        Scenario {
            input: DashInput {
                dash_pressed: true,
                primary_axis: Vec2::new(1.0, 1.0),
                ..Default::default()
            },
            ..plain(DashMode::PrimaryAxis)
        },
        Scenario {
            input: DashInput {
                dash_pressed: true,
                secondary_axis: Vec2::new(-1.0, 0.0),
                ..Default::default()
            },
            ..plain(DashMode::SecondaryAxis)
        },
        Scenario {
            input: DashInput {
                dash_pressed: true,
                pointer_ray: Some(pointer_ray),
                ..Default::default()
            },
            ..plain(DashMode::PointerTarget)
        },
        plain(DashMode::FacingModel),
        Scenario {
            external_direction: Some(Vec3::new(-1.0, 0.0, -1.0)),
            ..plain(DashMode::External)
        },
        Scenario {
            interrupt_after: Some(3),
            ..plain(DashMode::Fixed)
        },
    ]
}

fn run(settings: &DemoSettings, scenario: &Scenario) -> DashReport {
    let mut config = settings.dash.clone();
    config.mode = scenario.mode;
    let mut dash = DashAbility::new(config);
    if let Some(direction) = scenario.external_direction {
        dash.set_external_direction(direction);
    }

    let mut actor = SimActor::default();
    actor.turn_to(Vec3::new(0.3, 0.0, 1.0));
    let origin = actor.transform.position;

    let mut clock = SimClock::new(settings.simulation.clock.clone());
    let mut report = DashReport {
        mode: scenario.mode,
        origin,
        started: false,
        destination: None,
        final_position: origin,
        fixed_steps: 0,
        dash_steps: 0,
        interrupted: false,
        cooldown_remaining: 0.0,
        cooldown_total: dash.cooldown_total(),
        cooldown_fill: 1.0,
        simulated_time: 0.0,
    };

    for _ in 0..settings.simulation.frames_per_dash {
        for _ in 0..clock.advance(settings.simulation.frame_delta) {
            let input = if report.fixed_steps == 0 {
                scenario.input
            } else {
                DashInput::default()
            };

            if Some(report.dash_steps) == scenario.interrupt_after && dash.is_dashing() {
                report.interrupted = dash.force_stop(&mut actor, Some(MovementMode::Knockback));
            }

            let signals = dash.tick(&mut actor, &input, clock.step());
            signals.apply(&mut actor);

            report.started |= signals.dash_started;
            if let Some(run) = dash.run() {
                report.destination = Some(run.destination());
            }
            if signals.is_dashing {
                report.dash_steps += 1;
            }
            report.fixed_steps += 1;
        }
    }

    if !report.started {
        warn!("{:?} dash never started", scenario.mode);
    }
    report.final_position = actor.transform.position;
    report.cooldown_remaining = dash.cooldown_remaining();
    report.cooldown_fill = dash.cooldown().fill_fraction();
    report.simulated_time = clock.total_time;
    report
}
