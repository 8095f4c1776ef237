pub mod arbiter;
pub mod client;
pub mod delay;
pub mod http;
pub mod local;
pub mod result;

pub use arbiter::Arbiter;
pub use client::{interpret_move_response, SyncClient};
pub use delay::DelayPolicy;
pub use http::HttpArbiter;
pub use local::LocalArbiter;
pub use result::{
    NewGameStart, RejectionKind, RemoteRejection, RemoteReply, RemoteResult, RemoteUpdate,
    ResignationNotice,
};
