pub mod extract;
pub mod hook;
pub mod last_index;
