pub mod tunnel;

pub use tunnel::start_tunnel_server;
