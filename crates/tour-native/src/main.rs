mod config;
mod script;
mod sink;

use std::path::PathBuf;

use anyhow::Context;
use config::NativeConfig;
use script::Cue;
use sink::LoggingSink;
use tour_core::{flush, PathProvider, PolylinePath, Tour};

const DEFAULT_CONFIG: &str = "assets/tour.toml";

fn config_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG))
}

fn log_readout(tour: &Tour, frame: u64) {
    let line = tour
        .readout()
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    log::info!("[readout] frame {frame}: {line}");
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = config_path();
    let cfg = NativeConfig::load(&path)
        .with_context(|| format!("loading tour description {}", path.display()))?;

    let track = PolylinePath::new(cfg.track.points.clone());
    log::info!(
        "[native] {} track point(s), {:.2} m",
        track.points().len(),
        track.length()
    );
    let mut tour = Tour::from_config(Box::new(track), &cfg.tour);

    let fps = if cfg.session.fps.is_finite() && cfg.session.fps > 0.0 {
        cfg.session.fps
    } else {
        log::warn!("[native] invalid fps {}, using 60", cfg.session.fps);
        60.0
    };
    let dt = 1.0 / fps;
    let cues = script::expand(&cfg.session.script);
    log::info!("[native] replaying {} frame(s) at {fps} fps", cues.len());

    let mut sink = LoggingSink::new();
    let mut writes = Vec::new();
    let mut frame: u64 = 0;
    for cue in cues {
        let input = match cue {
            Cue::Jump(distance) => {
                log::info!("[native] jump to {distance:.2}");
                tour.navigator_mut().jump_to(distance);
                continue;
            }
            Cue::Input(input) => input,
        };
        sink.begin_frame(frame);
        tour.frame(dt, &input, &mut writes);
        flush(&mut writes, &mut sink);

        let every = u64::from(cfg.session.readout_every);
        if every > 0 && frame % every == 0 {
            log_readout(&tour, frame);
        }
        frame += 1;
    }

    log_readout(&tour, frame);
    log::info!(
        "[native] done: {} frame(s), {} write(s), {} fire(s), {} visible, {} lit, {} idle timeout(s)",
        frame,
        sink.writes(),
        sink.fires(),
        sink.visible_count(),
        sink.lit_count(),
        sink.idle_timeouts()
    );
    Ok(())
}
