mod context;
mod state;

pub use context::SessionContext;
pub use state::SessionState;
