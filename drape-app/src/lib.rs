pub mod cli;
pub mod session;
pub mod state;
pub mod telemetry;

pub use session::{Notice, NoticeKind, StorefrontSession};
pub use state::AppState;
