use argh::FromArgs;
use std::{fs::File, io::BufWriter, path::PathBuf};

use armeasure::geometry::{distance, format_distance_cm, Viewport};
use armeasure::overlay::Color;
use armeasure::raster::{rasterize_to_canvas, viewport_size, write_canvas_png};
use armeasure::tracking::{
    MeasureSession, SessionConfig, SimulatedConfig, SimulatedProvider, TickOutcome,
};

#[derive(FromArgs)]
/// Run a measurement session against a simulated camera and save the last overlay
struct Args {
    /// number of frames to simulate
    #[argh(option, short = 'n', default = "240")]
    frames: u64,

    /// viewport width in pixels
    #[argh(option, default = "1080")]
    width: u32,

    /// viewport height in pixels
    #[argh(option, default = "2400")]
    height: u32,

    /// place an anchor every this many frames
    #[argh(option, default = "60")]
    anchor_every: u64,

    /// path to a session configuration in JSON
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// directory to write overlay.json and overlay.png to
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };

    let viewport = Viewport::new(args.width, args.height)?;
    let provider = SimulatedProvider::new(SimulatedConfig {
        // a dropped and a repeated frame to exercise recovery
        failing_frames: vec![17],
        stale_frames: vec![18],
        ..SimulatedConfig::new(viewport)
    });

    let mut session = MeasureSession::new(provider, config)?;
    session.start()?;

    let anchor_every = args.anchor_every.max(1);
    let mut skipped = 0;
    for frame in 0..args.frames {
        if session.tick() != TickOutcome::Rendered {
            skipped += 1;
        }
        if frame % anchor_every != anchor_every - 1 || !session.can_add_anchor() {
            continue;
        }
        match session.add_anchor() {
            Ok(Some(anchor)) => log::info!("frame {frame}: placed {}", anchor.id),
            Ok(None) => {}
            Err(err) => log::warn!("frame {frame}: could not place an anchor: {err}"),
        }
    }
    if let Some(status) = session.status_message() {
        println!("Status: {status}");
    }
    session.stop();

    println!(
        "Simulated {} frames, {} rendered, {} skipped",
        args.frames,
        session.frames_rendered(),
        skipped
    );

    let snapshot = session.anchors();
    let active: Vec<_> = snapshot.active_anchors().collect();
    for pair in active.windows(2) {
        println!(
            "{} -> {}: {}",
            pair[0].id,
            pair[1].id,
            format_distance_cm(distance(&pair[0].pose, &pair[1].pose))
        );
    }

    std::fs::create_dir_all(&args.output_dir)?;

    let json_path = args.output_dir.join("overlay.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&json_path)?), session.overlay())?;
    println!(
        "Wrote {} draw commands to {}",
        session.overlay().len(),
        json_path.display()
    );

    let background = Color::rgb(32, 32, 32);
    let canvas = rasterize_to_canvas(viewport_size(&viewport), background, session.overlay())?;
    let png_path = args.output_dir.join("overlay.png");
    write_canvas_png(&png_path, &canvas)?;
    println!("Wrote {}", png_path.display());

    Ok(())
}
