pub mod websocket;

pub use websocket::{split, WsFrameSink, WsMessageSource};
