use nalgebra_glm::Vec3;
use orchard_ecs::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default, Clone, PartialEq)]
struct Calls {
	init: u32,
	update: u32,
	destroy: u32,
	counter: Vec<u32>,
	destroyed_on_frame: Option<u64>,
}

/// Counts its own callbacks and destroys its entity during the update of `destroy_on`.
struct Counting {
	counter: u32,
	destroy_on: Option<u64>,
	calls: Rc<RefCell<Calls>>,
}

impl Counting {
	fn new(destroy_on: Option<u64>) -> (Self, Rc<RefCell<Calls>>) {
		let calls = Rc::new(RefCell::new(Calls::default()));
		let script = Self {
			counter: 0,
			destroy_on,
			calls: calls.clone(),
		};
		(script, calls)
	}
}

impl Script for Counting {
	fn on_init(&mut self, _ctx: &mut ScriptContext) {
		self.calls.borrow_mut().init += 1;
	}

	fn on_update(&mut self, ctx: &mut ScriptContext, _delta_seconds: f64) {
		self.counter += 1;

		let mut calls = self.calls.borrow_mut();
		calls.update += 1;
		calls.counter.push(self.counter);

		if self.destroy_on == Some(ctx.frame()) {
			let entity = ctx.entity();
			ctx.commands().destroy(entity);
		}
	}

	fn on_destroy(&mut self, ctx: &mut ScriptContext) {
		let mut calls = self.calls.borrow_mut();
		calls.destroy += 1;
		calls.destroyed_on_frame = Some(ctx.frame());
	}
}

#[test]
fn transform_without_scripts_is_untouched() {
	let mut world = World::new();
	let entity = world.create_entity().unwrap();
	let transform = Transform::from_position(Vec3::new(0.0, 0.0, 0.0));
	world.add_component(entity, transform).unwrap();

	let frame = world.frame();
	let report = world.update(0.016).unwrap();

	assert_eq!(Some(&transform), world.get_component::<Transform>(entity));
	assert_eq!(frame + 1, world.frame());
	assert_eq!(0, report.scripts_updated);
}

#[test]
fn counting_script_over_three_frames() {
	let mut world = World::new();
	let entity = world.create_entity().unwrap();
	let (script, calls) = Counting::new(None);
	world.add_script(entity, script).unwrap();

	let mut reports = Vec::new();
	for _ in 0..3 {
		reports.push(world.update(0.016).unwrap());
	}

	let calls = calls.borrow();
	assert_eq!(1, calls.init);
	assert_eq!(3, calls.update);
	assert_eq!(0, calls.destroy);
	assert_eq!(vec![1, 2, 3], calls.counter);

	assert_eq!(1, reports[0].scripts_initialized);
	assert_eq!(0, reports[1].scripts_initialized);
	assert!(reports.iter().all(|r| r.scripts_updated == 1));
	assert_eq!(3, world.script::<Counting>(entity).unwrap().counter);
}

#[test]
fn queued_self_destruction() {
	let mut world = World::new();
	let entity = world.create_entity().unwrap();
	world.add_component(entity, Transform::default()).unwrap();

	// Frames are numbered from 0, so the second frame is frame 1.
	let (script, calls) = Counting::new(Some(1));
	world.add_script(entity, script).unwrap();

	world.update(0.016).unwrap();
	let second = world.update(0.016).unwrap();

	{
		let calls = calls.borrow();
		assert_eq!(1, calls.destroy);
		assert_eq!(Some(1), calls.destroyed_on_frame);
		assert_eq!(2, calls.update, "The destroyed script still completes its update");
	}
	assert_eq!(1, second.commands_applied);
	assert!(second.rejected.is_empty());
	assert!(!world.is_alive(entity));
	assert!(!world.has_component::<Transform>(entity));

	let third = world.update(0.016).unwrap();
	assert_eq!(0, third.scripts_updated);
	assert_eq!(0, world.scripts().active_count());
	assert_eq!(0, world.scripts().count_for(world.registry(), entity));
	assert_eq!(1, calls.borrow().destroy, "on_destroy runs exactly once");
}

#[test]
fn scripts_see_each_other_by_handle() {
	struct Follow {
		target: Entity,
	}

	impl Script for Follow {
		fn on_update(&mut self, ctx: &mut ScriptContext, _delta_seconds: f64) {
			let Some(target) = ctx.get::<Transform>(self.target).map(|t| t.position) else {
				return;
			};
			if let Some(own) = ctx.get_own_mut::<Transform>() {
				own.position = target;
			}
		}
	}

	let mut world = World::new();
	let target = world.create_entity().unwrap();
	let follower = world.create_entity().unwrap();

	world.add_component(target, Transform::from_position(Vec3::new(3.0, 4.0, 5.0))).unwrap();
	world.add_component(follower, Transform::default()).unwrap();
	world.attach(follower, Scripted(Follow { target })).unwrap();

	world.update(0.016).unwrap();
	assert_eq!(
		Vec3::new(3.0, 4.0, 5.0),
		world.get_component::<Transform>(follower).unwrap().position
	);

	// A stale target is simply ignored.
	world.destroy_entity(target).unwrap();
	world.update(0.016).unwrap();
	assert_eq!(
		Vec3::new(3.0, 4.0, 5.0),
		world.get_component::<Transform>(follower).unwrap().position
	);
}
