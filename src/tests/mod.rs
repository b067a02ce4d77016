mod entity_registry_tests;
mod component_store_tests;
