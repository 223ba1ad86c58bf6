pub mod mock_host_identity;
pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_host_identity::MockHostIdentity;
#[allow(unused_imports)]
pub use mock_transport::{query_for, MockTransport};
