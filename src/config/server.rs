/// HTTP server configuration constants.

/// Address the HTTP/WebSocket server binds to.
pub const BIND_ADDR: &str = "127.0.0.1";

/// Port the HTTP/WebSocket server binds to.
pub const BIND_PORT: u16 = 8080;
