pub mod document;
pub mod event;
pub mod journal;
pub mod session;
pub mod turn;

pub use document::*;
pub use event::*;
pub use journal::*;
pub use session::*;
pub use turn::*;
