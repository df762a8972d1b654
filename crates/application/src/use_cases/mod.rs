pub mod session;

pub use session::HandleSessionUseCase;
