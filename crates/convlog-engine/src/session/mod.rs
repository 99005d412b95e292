pub mod reconstruct;
pub mod turn_builder;
pub mod usage;

pub use reconstruct::TurnReconstructor;
pub use turn_builder::TurnBuilder;
pub use usage::merge_usage;
