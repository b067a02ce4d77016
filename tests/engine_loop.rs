use orchard_ecs::prelude::*;

const CONFIG: &str = r#"
app_name = "Loop Test"
target_frame_rate = 30
fixed_timestep = 0.02

[world]
initial_capacity = 8
max_entities = 8
"#;

/// Spawns one entity per frame and stops the engine once the world is full.
struct Spawner {
	exit: ExitHandle,
}

impl Script for Spawner {
	fn on_update(&mut self, ctx: &mut ScriptContext, _delta_seconds: f64) {
		if ctx.frame() < 7 {
			ctx.commands().spawn().with(Transform::default());
		} else {
			self.exit.request();
		}
	}
}

#[test]
fn run_configured_engine() {
	let config = EngineConfig::from_toml_str(CONFIG).unwrap();
	let clock = ManualClock::new();
	let mut engine = Engine::with_clock(config.clone(), clock.clone());
	engine.initialize(&config.app_name, config.width, config.height).unwrap();

	let exit = engine.exit_handle();
	let world = engine.world_mut();
	let root = world.create_entity().unwrap();
	world.add_script(root, Spawner { exit }).unwrap();

	engine.run().unwrap();

	assert_eq!(8, engine.frame_count());
	assert_eq!(8, engine.world().entity_count());
	assert_eq!(7, engine.world().store::<Transform>().unwrap().len());
	assert!((engine.total_time() - 7.0 / 30.0).abs() < 1e-6);

	// The world is full; the next spawn fails the frame instead of being skipped.
	engine.world_mut().commands().spawn();
	let error = engine.tick().unwrap_err();
	assert_eq!(Error::AllocatorExhausted { capacity: 8 }, error);
	assert!(error.is_fatal());
	assert_eq!(8, engine.frame_count());

	engine.shutdown();
	assert_eq!(0, engine.world().entity_count());
}

/// Spawns a new entity every frame, without ever stopping on its own.
struct Flood;

impl Script for Flood {
	fn on_update(&mut self, ctx: &mut ScriptContext, _delta_seconds: f64) {
		ctx.commands().spawn().with(Transform::default());
	}
}

#[test]
fn exhausting_the_world_stops_the_loop() {
	let mut config = EngineConfig::default();
	config.target_frame_rate = 0;
	config.world.max_entities = Some(4);

	let mut engine = Engine::with_clock(config, ManualClock::new());
	engine.initialize("Flood", 320, 240).unwrap();

	let world = engine.world_mut();
	let root = world.create_entity().unwrap();
	world.add_script(root, Flood).unwrap();

	// Frames 0..2 fill the three free slots, frame 3 runs out of them.
	assert_eq!(Err(Error::AllocatorExhausted { capacity: 4 }), engine.run());
	assert_eq!(3, engine.frame_count());
	assert_eq!(3, engine.world().frame(), "The failed frame must not complete");
	assert_eq!(4, engine.world().entity_count());
}
