pub mod actor;
pub mod messages;
pub mod view;

pub use actor::GameActor;
pub use messages::*;
pub use view::{BoardWidget, Presenter};
