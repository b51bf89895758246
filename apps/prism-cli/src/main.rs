use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use glam::Vec2;
use prism_camera::Camera;
use prism_input::{Action, CameraController, ControllerConfig, Motion};
use prism_render::{DebugTextRenderer, FRAME_PARAMS, FrameParams, Renderer};
use prism_scene::{HEADER_SIZE, SLOT_SIZE, Scene, SceneConfig, demo, offsets};
use prism_time::{FPS_WINDOW, Timer};
use prism_tools::{SceneInspector, SceneSummary, SlotInfo};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prism-cli", about = "Headless tools for the prism renderer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, slot layout and shader parameter names
    Info,
    /// Encode the demo scene and print every slot
    Dump {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also print the raw bytes of each slot
        #[arg(long, conflicts_with = "json")]
        hex: bool,
        /// Primitive buffer capacity
        #[arg(long, default_value = "64")]
        max_slots: usize,
    },
    /// Run the frame loop headless with a fixed frame time
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Frame time in milliseconds
        #[arg(long, default_value = "16")]
        dt_ms: u64,
        /// Hold the forward key for the whole run
        #[arg(long)]
        forward: bool,
    },
}

#[derive(Serialize)]
struct Dump {
    summary: SceneSummary,
    slots: Vec<SlotInfo>,
}

fn demo_scene(max_slots: usize) -> anyhow::Result<Scene> {
    let mut scene = Scene::new(SceneConfig { max_slots })?;
    demo::populate(&mut scene)?;
    Ok(scene)
}

fn print_info() {
    println!("prism-cli v{}", env!("CARGO_PKG_VERSION"));
    println!("slot size: {SLOT_SIZE} bytes, header: {HEADER_SIZE} bytes");
    println!("slot layout:");
    for (name, offset) in [
        ("type", offsets::TYPE),
        ("position", offsets::POSITION),
        ("orientation", offsets::ORIENTATION),
        ("shape scalar", offsets::SHAPE_SCALAR),
        ("shape vec3", offsets::SHAPE_VEC3),
        ("shape vec2", offsets::SHAPE_VEC2),
        ("shape vec3b", offsets::SHAPE_VEC3B),
        ("material type", offsets::MATERIAL_TYPE),
        ("albedo", offsets::ALBEDO),
        ("roughness", offsets::ROUGHNESS),
        ("refraction index", offsets::REFRACTION_INDEX),
    ] {
        println!("  {offset:>3}  {name}");
    }
    let names: Vec<&str> = FRAME_PARAMS.iter().map(|(_, name)| *name).collect();
    println!("frame params: {}", names.join(", "));
    println!("fps window: {} ms", FPS_WINDOW.as_millis());
}

fn dump(json: bool, hex: bool, max_slots: usize) -> anyhow::Result<()> {
    let scene = demo_scene(max_slots)?;
    let summary = SceneInspector::summary(&scene);
    let slots = SceneInspector::list_slots(&scene)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&Dump { summary, slots })?);
        return Ok(());
    }

    println!("{summary}");
    let bytes = scene.buffer().as_bytes();
    for info in &slots {
        println!("{info}");
        if hex {
            let slot = &bytes[info.offset..info.offset + SLOT_SIZE];
            for (row, chunk) in slot.chunks(16).enumerate() {
                let line: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
                println!("    {:3}: {}", row * 16, line.join(" "));
            }
        }
    }
    Ok(())
}

fn simulate(frames: u64, dt_ms: u64, forward: bool) -> anyhow::Result<()> {
    let _span = tracing::info_span!("simulate", frames, dt_ms).entered();

    let scene = demo_scene(SceneConfig::default().max_slots)?;
    let mut camera = Camera::new(demo::CAMERA_POSITION, demo::CAMERA_ORIENTATION);
    let mut controller = CameraController::new(ControllerConfig::default());
    if forward {
        controller.apply(Action::Press(Motion::Forward));
    }

    let start = Instant::now();
    let mut timer = Timer::starting_at(start);
    let screen = Vec2::new(1280.0, 720.0);
    camera.set_aspect(screen.x / screen.y);

    for frame in 1..=frames {
        timer.update_at(start + Duration::from_millis(frame * dt_ms));
        controller.drive(&mut camera);
        camera.update_placement(timer.delta());
        if timer.is_fps_ready() {
            tracing::info!(fps = timer.fps(), frame = timer.frame_index(), "fps");
        }
    }

    let params = FrameParams::capture(&camera, &timer, screen);
    print!("{}", DebugTextRenderer::new().render(&scene, &params));
    println!(
        "frames={} elapsed={:.3}s last_fps={}",
        timer.frame_index(),
        timer.elapsed_seconds(),
        timer.fps()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => print_info(),
        Commands::Dump {
            json,
            hex,
            max_slots,
        } => dump(json, hex, max_slots)?,
        Commands::Simulate {
            frames,
            dt_ms,
            forward,
        } => simulate(frames, dt_ms, forward)?,
    }

    Ok(())
}
