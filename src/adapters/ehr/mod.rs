//! EHR provider clients
//!
//! All clients share [`HttpTransport`] and implement [`EhrClient`], so the
//! integration manager can hold either behind one trait object.

pub mod transport;
pub mod vendor;

pub use transport::HttpTransport;
pub use vendor::{DrChronoClient, EhrClient, EpicClient};
