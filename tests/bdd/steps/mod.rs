pub mod pet_steps;
pub mod store_steps;
pub mod world;
