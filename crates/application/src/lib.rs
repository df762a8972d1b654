//! VLESS Relay Application Layer
pub mod ports;
pub mod relay;
pub mod session;
pub mod use_cases;
