//! Subcommand implementations

use anyhow::{bail, Context};
use marquee_core::{
    ControllerConfig, EngineCall, EngineStateCode, LifecycleController, LifecycleEvent,
    MediaSource, PlatformInfo, PlaybackQueue, PlaybackSnapshot, PlaybackState, SimulatedProvider,
    SourceSpec, StateSink,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// A scripted lifecycle run: platform flag, source list, ordered events
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    platform: PlatformInfo,
    sources: Vec<SourceSpec>,
    events: Vec<LifecycleEvent>,
}

#[derive(Serialize)]
struct RunReport {
    events: usize,
    total_engines: usize,
    live_engines: usize,
    active: bool,
    calls: Vec<EngineCall>,
    states: Vec<PlaybackState>,
    snapshot: PlaybackSnapshot,
}

#[derive(Default)]
struct CollectingSink(Mutex<Vec<PlaybackState>>);

impl CollectingSink {
    fn states(&self) -> Vec<PlaybackState> {
        self.0.lock().unwrap().clone()
    }
}

impl StateSink for CollectingSink {
    fn on_playback_state(&self, state: PlaybackState) {
        self.0.lock().unwrap().push(state);
    }
}

/// Drive a scenario file through a lifecycle controller over the simulated
/// engine. Each fresh acquisition gets a buffering-then-ready state pair
/// delivered so the observer path shows up in the report.
pub async fn run(path: &Path, json: bool, step_delay_ms: u64) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario: Scenario =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    // A scenario whose queue can never build would just log per event;
    // surface that as a hard error instead.
    PlaybackQueue::from_specs(&scenario.sources).context("scenario sources do not resolve")?;

    info!(
        events = scenario.events.len(),
        sources = scenario.sources.len(),
        multi_window = scenario.platform.supports_multi_window,
        "Scenario loaded"
    );

    let provider = SimulatedProvider::new();
    let sink = Arc::new(CollectingSink::default());
    let mut controller = LifecycleController::new(
        ControllerConfig {
            platform: scenario.platform,
            sources: scenario.sources.clone(),
        },
        Box::new(provider.clone()),
    )
    .with_state_sink(sink.clone());

    let mut engines_seen = 0;
    for event in &scenario.events {
        controller.handle_event(*event);

        if provider.total_engines() > engines_seen {
            engines_seen = provider.total_engines();
            if let Some(engine) = provider.last_engine() {
                engine.deliver_state(EngineStateCode::BUFFERING);
                engine.deliver_state(EngineStateCode::READY);
            }
        }

        if step_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(step_delay_ms)).await;
        }
    }

    let report = RunReport {
        events: scenario.events.len(),
        total_engines: provider.total_engines(),
        live_engines: provider.live_engines(),
        active: controller.is_active(),
        calls: provider.calls(),
        states: sink.states(),
        snapshot: controller.snapshot().clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "Scenario: {} events, {} engine(s) constructed, {} live, session active: {}",
        report.events, report.total_engines, report.live_engines, report.active
    );

    println!("\nEngine calls:");
    for call in &report.calls {
        println!("  {call:?}");
    }

    println!("\nObserved states:");
    for state in &report.states {
        println!("  {state}");
    }

    println!(
        "\nSnapshot: position={}ms queue_index={} play_when_ready={}",
        report.snapshot.position_ms, report.snapshot.queue_index, report.snapshot.play_when_ready
    );
}

/// Resolve every configured source and report its format; exit non-zero
/// when any source needs a hint it does not have.
pub fn validate(path: &Path) -> anyhow::Result<()> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    // A full scenario file also parses as a config; extra fields are ignored.
    let config: ControllerConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    let mut failures = 0;
    for spec in &config.sources {
        match MediaSource::from_spec(spec) {
            Ok(source) => {
                let origin = match source.mime_hint {
                    Some(mime) => format!("hinted {mime}"),
                    None => "inferred".to_string(),
                };
                println!("  ok    {}  [{} - {}]", source.uri, source.format, origin);
            }
            Err(e) => {
                failures += 1;
                println!("  fail  {}: {e}", spec.uri);
            }
        }
    }

    println!(
        "\n{} source(s), {} failed, platform multi_window={}",
        config.sources.len(),
        failures,
        config.platform.supports_multi_window
    );

    if failures > 0 {
        bail!("{failures} source(s) failed to resolve");
    }
    Ok(())
}
