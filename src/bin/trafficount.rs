//! Demo driver: runs the counting pipeline over a synthetic detection
//! source and writes the CSV export on exit.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trafficount::{Config, CounterPipeline, DetectionSource, Error, RawDetection};

#[derive(Parser, Debug)]
#[command(name = "trafficount", about = "Object counting demo with a synthetic detection source")]
struct Args {
    /// Path to a JSON deployment config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of synthetic frames to process
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Frame pacing in milliseconds
    #[arg(long, default_value_t = 33)]
    frame_interval_ms: u64,

    /// Where to write the CSV export (overrides the config)
    #[arg(long)]
    export: Option<PathBuf>,
}

/// Stand-in for a real detector: a car cruising across the frame, a
/// pedestrian idling near the left edge, and the occasional motorcycle.
struct SyntheticSource {
    frame: u64,
    total: u64,
}

impl DetectionSource for SyntheticSource {
    type Error = std::convert::Infallible;

    fn next_frame(&mut self) -> Result<Option<Vec<RawDetection>>, Self::Error> {
        if self.frame >= self.total {
            return Ok(None);
        }
        let t = self.frame as f64;
        self.frame += 1;

        // 3 px/frame keeps consecutive boxes well above the match threshold.
        let car_x = (t * 3.0) % 560.0;
        let mut detections = vec![
            RawDetection::new("car", 0.92, (car_x, 180.0, 80.0, 50.0)),
            RawDetection::new("person", 0.81, (30.0, 260.0, 25.0, 60.0)),
        ];
        if (self.frame / 90) % 2 == 1 {
            let bike_x = 600.0 - (t * 2.0) % 560.0;
            detections.push(RawDetection::new("motorcycle", 0.77, (bike_x, 210.0, 40.0, 30.0)));
        }
        Ok(Some(detections))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trafficount=info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    info!(
        frames = args.frames,
        mode = ?config.counting_mode,
        zones = config.zones.len(),
        endpoint = config.endpoint_url.as_deref().unwrap_or("-"),
        "starting pipeline"
    );

    let source = SyntheticSource {
        frame: 0,
        total: args.frames,
    };
    let export_path = args.export.clone().or_else(|| config.export_path.clone());
    let mut pipeline = CounterPipeline::new(source, &config)?;

    while let Some(summary) = pipeline.process_frame()? {
        if summary.frame % 30 == 0 {
            let live = summary.live;
            info!(
                frame = summary.frame,
                tracked = summary.tracked,
                car = live.car,
                motorbike = live.motorbike,
                person = live.person,
                "live counts"
            );
        }
        tokio::time::sleep(Duration::from_millis(args.frame_interval_ms)).await;
    }

    // Final flush so the shortest runs still export something.
    pipeline.dispatch_now(Utc::now());

    let unique = pipeline.state().unique_counts();
    info!(
        car = unique.car,
        bus = unique.bus,
        truck = unique.truck,
        motorbike = unique.motorbike,
        person = unique.person,
        "distinct objects seen"
    );

    let path = export_path.unwrap_or_else(|| {
        PathBuf::from(format!("vehicle_history_{}.csv", Utc::now().format("%Y%m%dT%H%M%S")))
    });
    match pipeline.dispatcher().write_csv(&path) {
        Ok(()) => {}
        Err(Error::EmptyExport) => warn!("no records dispatched, nothing to export"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
