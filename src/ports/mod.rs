/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound ports (driven ports - infrastructure interfaces) exist;
/// the use case itself is the inbound API.
pub mod outbound;
