/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod checksums;
pub mod console;
pub mod filesystem;
pub mod formatters;
