//! A player walking in circles and a camera trailing it.
//!
//! Run with `RUST_LOG=debug cargo run --example follow_camera` to see the engine logs.

use nalgebra_glm::{self as glm, Vec3};
use orchard_ecs::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Walks forward while turning at a constant rate.
struct Walker {
	move_speed: f32,
	turn_speed: f32,
}

impl Script for Walker {
	fn on_update(&mut self, ctx: &mut ScriptContext, delta_seconds: f64) {
		let dt = delta_seconds as f32;
		let Some(transform) = ctx.get_own_mut::<Transform>() else {
			return;
		};

		let turn = glm::quat_angle_axis(self.turn_speed * dt, &Vec3::y());
		transform.rotate(&turn);
		let step = transform.forward() * self.move_speed * dt;
		transform.translate(&step);
	}
}

/// Keeps its entity behind and above `target`, easing towards the ideal spot.
struct FollowCamera {
	target: Entity,
	distance: f32,
	height: f32,
	smoothing: f32,
	frames: u64,
	exit: ExitHandle,
}

impl Script for FollowCamera {
	fn on_init(&mut self, ctx: &mut ScriptContext) {
		info!(camera = %ctx.entity(), target = %self.target, "camera attached");
	}

	fn on_update(&mut self, ctx: &mut ScriptContext, delta_seconds: f64) {
		if ctx.frame() >= self.frames {
			self.exit.request();
		}

		let Some(target) = ctx.get::<Transform>(self.target).copied() else {
			return;
		};

		let desired = target.position - target.forward() * self.distance + Vec3::y() * self.height;
		let blend = (self.smoothing * delta_seconds as f32).min(1.0);

		if let Some(camera) = ctx.get_own_mut::<Transform>() {
			camera.position = glm::lerp(&camera.position, &desired, blend);
		}

		if ctx.frame() % 30 == 0 {
			info!(frame = ctx.frame(), player = ?target.position, "camera following");
		}
	}

	fn on_destroy(&mut self, ctx: &mut ScriptContext) {
		info!(camera = %ctx.entity(), "camera detached");
	}
}

fn main() -> orchard_ecs::error::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config = EngineConfig::default();
	let mut engine = Engine::new(config.clone());
	engine.initialize("Follow Camera", config.width, config.height)?;

	let exit = engine.exit_handle();
	let world = engine.world_mut();

	let player = world.create_entity()?;
	world.add_component(player, Transform::default())?;
	world.add_script(player, Walker { move_speed: 4.0, turn_speed: 0.5 })?;

	let camera = world.create_entity()?;
	world.add_component(camera, Transform::from_position(Vec3::new(0.0, 2.0, -5.0)))?;
	world.add_script(
		camera,
		FollowCamera {
			target: player,
			distance: 5.0,
			height: 2.0,
			smoothing: 10.0,
			frames: 180,
			exit,
		},
	)?;

	engine.run()?;

	let world = engine.world();
	if let (Some(player), Some(camera)) = (
		world.get_component::<Transform>(player),
		world.get_component::<Transform>(camera),
	) {
		info!(
			frames = engine.frame_count(),
			player = ?player.position,
			camera = ?camera.position,
			"demo finished"
		);
	}

	engine.shutdown();
	Ok(())
}
