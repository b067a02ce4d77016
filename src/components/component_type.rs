use crate::components::ComponentId;

/// A plain data record that can be attached to an [entity](crate::entities::Entity).
///
/// Implement it with `#[derive(Component)]`, which assigns the type a [ComponentId]
/// on first use. Each kind gets its own [ComponentStore](crate::components::ComponentStore)
/// inside a [World](crate::world::World), created when the kind is first registered or attached.
pub trait Component: 'static {
	/// The runtime id of the component type.
	fn component_id() -> ComponentId;

	/// The name of the component type, for diagnostics and inspectors.
	fn component_name() -> &'static str;
}
