//! Strider - headless third-person controller demo
//!
//! Builds a small collision scene, feeds a scripted input sequence through the
//! input handler and runs the controller frame by frame.

mod settings;

use anyhow::Result;
use glam::{Vec2, Vec3};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use strider_core::{FrameClock, Transform};
use strider_game::{FrameReport, InputHandler, ThirdPersonController};
use strider_physics::{CharacterBody, PhysicsWorld, WorldMover};

use settings::Settings;

const FRAME_TIME: f32 = 1.0 / 60.0;

/// One step of the scripted input sequence
enum ScriptEvent {
    Key(KeyCode, ElementState),
    Mouse(MouseButton, ElementState),
    Look(f64, f64),
    Stick(Vec2, Vec2),
}

/// Scripted events keyed by the frame they fire on
fn script() -> Vec<(u64, ScriptEvent)> {
    use ElementState::{Pressed, Released};
    vec![
        (10, ScriptEvent::Key(KeyCode::KeyW, Pressed)),
        (90, ScriptEvent::Key(KeyCode::ShiftLeft, Pressed)),
        (150, ScriptEvent::Look(240.0, 0.0)),
        (180, ScriptEvent::Key(KeyCode::ShiftLeft, Released)),
        (200, ScriptEvent::Key(KeyCode::Space, Pressed)),
        (203, ScriptEvent::Key(KeyCode::Space, Released)),
        (260, ScriptEvent::Mouse(MouseButton::Right, Pressed)),
        (270, ScriptEvent::Look(-120.0, 15.0)),
        (330, ScriptEvent::Mouse(MouseButton::Right, Released)),
        (340, ScriptEvent::Key(KeyCode::KeyW, Released)),
        (360, ScriptEvent::Stick(Vec2::new(0.4, 0.4), Vec2::new(60.0, 0.0))),
        (420, ScriptEvent::Stick(Vec2::ZERO, Vec2::ZERO)),
    ]
}

fn apply(input: &mut InputHandler, event: &ScriptEvent) {
    match event {
        ScriptEvent::Key(key, state) => input.handle_keyboard(PhysicalKey::Code(*key), *state),
        ScriptEvent::Mouse(button, state) => input.handle_mouse_button(*button, *state),
        ScriptEvent::Look(x, y) => input.handle_mouse_motion((*x, *y)),
        ScriptEvent::Stick(move_axis, look) => input.handle_stick(*move_axis, *look),
    }
}

fn build_scene() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.create_ground(0.0);
    world.create_static_box(Vec3::new(4.0, 2.0, 0.5), Vec3::new(0.0, 2.0, 30.0));
    world.create_static_box(Vec3::new(0.5, 1.0, 6.0), Vec3::new(-6.0, 1.0, 12.0));
    world.create_static_box(Vec3::new(1.0, 0.2, 1.0), Vec3::new(3.0, 0.2, 8.0));
    world
}

fn log_report(frame: u64, report: &FrameReport) {
    info!(
        "frame {:>3} pos ({:>6.2}, {:>5.2}, {:>6.2}) facing {:>6.1} cam ({:>6.1}, {:>5.1}) {:?} speed {:.2} aim {:.0}{}",
        frame,
        report.position.x,
        report.position.y,
        report.position.z,
        report.facing_yaw,
        report.camera_yaw,
        report.camera_pitch,
        report.viewpoint,
        report.animation.speed,
        report.animation.aim_weight,
        if report.aim_hit { " (hit)" } else { "" },
    );
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Strider controller demo...");

    let settings = Settings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings.save()?;
    }
    let mut clock = FrameClock::new(settings.clock.clone());

    let world = build_scene();
    let mut body = CharacterBody::new(Vec3::new(0.0, 0.1, 0.0));
    let mut controller = ThirdPersonController::new(
        settings.controller.clone(),
        Transform::from_position(body.position),
    );
    controller.set_viewport(settings.display.width as f32, settings.display.height as f32);

    let mut input = InputHandler::new();
    input.set_cursor_captured(true);

    let script = script();
    for frame in 0..480u64 {
        for (_, event) in script.iter().filter(|(at, _)| *at == frame) {
            debug!("frame {}: applying scripted input", frame);
            apply(&mut input, event);
        }

        let dt = clock.tick(FRAME_TIME);
        let snapshot = input.snapshot();
        let report = {
            let mut mover = WorldMover::new(&mut body, &world);
            controller.tick(&snapshot, input.device(), &mut mover, &world, dt)
        };
        input.end_frame();

        if frame % 30 == 0 || report.animation.jump {
            log_report(frame, &report);
        }
    }

    info!(
        "Finished after {} frames ({:.2}s simulated), character at {:?}",
        clock.frame_count, clock.total_time, body.position
    );
    Ok(())
}
