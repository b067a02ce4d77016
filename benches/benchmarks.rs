use criterion::*;
use nalgebra_glm::{Mat4, Vec3};
use orchard_ecs::prelude::*;

const COUNT: usize = 10000;

#[derive(Default, Component)]
struct Model(Mat4);

#[derive(Default, Component)]
struct Translation(Vec3);

#[derive(Default, Component)]
struct Rotation(Vec3);

#[derive(Default, Component)]
struct Velocity(Vec3);

#[derive(Default, Component)]
struct Motion {
    translation: Vec3,
    rotation: Vec3,
    velocity: Vec3,
    model: Mat4,
}

fn populate(world: &mut World) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(COUNT);
    for _ in 0..COUNT {
        let entity = world.create_entity().unwrap();
        world.add_component(entity, Model::default()).unwrap();
        world.add_component(entity, Translation::default()).unwrap();
        world.add_component(entity, Rotation::default()).unwrap();
        world.add_component(entity, Velocity(Vec3::new(0.0, 0.0, 1.0))).unwrap();
        entities.push(entity);
    }
    entities
}

fn create_entities(c: &mut Criterion) {
    c.bench_function("Create entities", |b| {
        b.iter_batched(
            World::new,
            |mut world| populate(&mut world),
            BatchSize::PerIteration,
        );
    });
}

fn destroy_entities(c: &mut Criterion) {
    c.bench_function("Destroy entities", |b| {
        b.iter_batched(
            || {
                let mut world = World::new();
                let entities = populate(&mut world);
                (world, entities)
            },
            |(mut world, entities)| {
                for entity in entities {
                    world.destroy_entity(entity).unwrap();
                }
            },
            BatchSize::PerIteration,
        );
    });
}

fn iterate_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("Iterate entities");
    group.bench_function("Join", |b| {
        let mut world = World::new();
        populate(&mut world);

        b.iter(|| {
            world.join(|_, t: &mut Translation, v: &Velocity| t.0 += v.0);
            world.join(|_, m: &mut Model, r: &Rotation| m.0 = Mat4::new_rotation(r.0));
        });
    });

    group.bench_function("Single-threaded", |b| {
        let mut world = World::new();
        for _ in 0..COUNT {
            let entity = world.create_entity().unwrap();
            world.add_component(entity, Motion { velocity: Vec3::new(0.0, 0.0, 1.0), ..Default::default() }).unwrap();
        }

        b.iter(|| {
            world.for_each(|_, m: &mut Motion| {
                m.translation += m.velocity;
                m.model = Mat4::new_translation(&m.translation) * Mat4::new_rotation(m.rotation);
            })
        });
    });

    group.bench_function("Multi-threaded", |b| {
        let mut world = World::new();
        for _ in 0..COUNT {
            let entity = world.create_entity().unwrap();
            world.add_component(entity, Motion { velocity: Vec3::new(0.0, 0.0, 1.0), ..Default::default() }).unwrap();
        }

        b.iter(|| {
            world.store_mut::<Motion>().unwrap().par_for_each(|_, m| {
                m.translation += m.velocity;
                m.model = Mat4::new_translation(&m.translation) * Mat4::new_rotation(m.rotation);
            })
        });
    });
}

criterion_group!(
    benchmarks,
    create_entities,
    destroy_entities,
    iterate_entities,
);
criterion_main!(benchmarks);
