/// Main configuration module.
///
/// Re-exports submodules for server, signaling, and rate-limit configuration.
pub mod limits;
pub mod server;
pub mod signaling;
