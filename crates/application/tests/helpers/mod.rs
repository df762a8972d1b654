pub mod mock_connector;
pub mod mock_transport;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use mock_connector::*;
#[allow(unused_imports)]
pub use mock_transport::*;
