pub mod handle_session;

pub use handle_session::HandleSessionUseCase;
