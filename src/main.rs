use clap::Parser;
use colored::*;

mod args;
mod camera;
mod config;
mod detector;
mod gesture;
mod gesture_tests;
mod hand;
mod movement;
mod output;
mod pipeline;
mod scroll;
mod types;

use args::Args;
use camera::CameraSource;
use config::AppConfig;
use movement::MovementTracker;
use output::WindowOutput;
use pipeline::Pipeline;
use scroll::ScrollWheel;

fn create_pipeline(args: &Args, config: &AppConfig) -> Box<dyn Pipeline> {
    if args.simulate || !std::path::Path::new(&args.landmark_model).exists() {
        if !args.simulate {
            println!(
                "{}",
                format!("Model {} not found, using simulated hand.", args.landmark_model).yellow()
            );
        }
        return Box::new(pipeline::DummyPipeline::new());
    }

    match hand::HandLandmarkPipeline::new(
        &args.landmark_model,
        &args.palm_model,
        config.defaults.detection_confidence,
        config.defaults.tracking_confidence,
    ) {
        Ok(p) => Box::new(p),
        Err(e) => {
            println!(
                "{}",
                format!("Failed to load hand pipeline ({}), using simulated hand.", e).red()
            );
            Box::new(pipeline::DummyPipeline::new())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.list {
        let cameras = nokhwa::query(nokhwa::utils::ApiBackend::Auto)?;
        println!("Available Cameras:");
        println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
        println!("{}", "-".repeat(60));
        for cam in cameras {
            println!("{:<5} | {:<30} | {:?}", cam.index(), cam.human_name(), cam.misc());
        }
        return Ok(());
    }

    // 0. Load Config
    let config = AppConfig::load()?;

    // 1. Setup Camera
    let mut camera = CameraSource::new(args.cam_index)?;
    println!("Opened camera: {}", camera.name());

    // 2. Setup Inference
    let mut pipeline = create_pipeline(&args, &config);
    println!("Active Pipeline: {}", pipeline.name());

    // 3. Setup Output and Actuation
    let width = camera.width();
    let height = camera.height();
    let mut window = WindowOutput::new("Rusty Hands", width as usize, height as usize)?;
    println!("Window created successfully.");

    let mut wheel = if args.no_scroll || !config.defaults.scroll_enabled {
        println!("Scroll actuation disabled (print-only).");
        ScrollWheel::disabled(config.defaults.scroll_lines)
    } else {
        ScrollWheel::new(config.defaults.scroll_lines)?
    };

    let mut tracker = MovementTracker::new(config.defaults.movement_threshold);
    let landmark_color = config::parse_hex(&config.ui.landmark_color_hex);

    println!("Starting Pipeline...");
    println!("Controls: open hand to scroll up, half-close to scroll down, [Esc] to quit");

    // 4. Loop
    let mut frame_count = 0u64;

    while window.is_open() && !window.is_key_down(minifb::Key::Escape) {
        // Capture. Ok(None) is a transient read failure; the camera module
        // turns a persistent one into an error instead of spinning forever.
        let Some(mut frame) = camera.capture()? else {
            continue;
        };

        if config.defaults.mirror_mode {
            image::imageops::flip_horizontal_in_place(&mut frame);
        }

        // --- PROCESSING ---
        let landmarks = pipeline.process(&frame)?;

        if let Some(lm) = &landmarks {
            if let Some(value) =
                gesture::gesture_value_with_span(lm, config.defaults.openness_span)
            {
                println!("Hand Gesture Value: {:.2}", value);
                if let Some(direction) = gesture::scroll_for_gesture(value) {
                    wheel.emit(direction);
                }
            }

            let movement = tracker.update(Some(lm));
            println!("{}", movement);
        }

        // --- DRAWING ---
        window.handle_frame(&frame, landmarks.as_ref(), &config.ui, landmark_color)?;

        frame_count += 1;
        if args.max_frames > 0 && frame_count >= args.max_frames {
            println!("Reached frame limit ({}), exiting.", args.max_frames);
            break;
        }
    }

    println!("Processed {} frames. Bye.", frame_count);
    // Camera stream and window close on drop.
    Ok(())
}
