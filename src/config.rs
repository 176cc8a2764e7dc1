//! Environment-driven configuration for the inference service.

/// Port the service binds when `HEARTRISK_PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

const PORT_ENV: &str = "HEARTRISK_PORT";
const DEBUG_ENV: &str = "HEARTRISK_DEBUG";

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to bind on `0.0.0.0`.
    pub port: u16,
    /// Whether debug-level logging is enabled by default.
    pub debug: bool,
}

impl ServerConfig {
    /// Read `HEARTRISK_PORT` and `HEARTRISK_DEBUG` with documented
    /// defaults (5000, false). A malformed port falls back to the default
    /// with a note on stderr rather than refusing to start.
    pub fn from_env() -> Self {
        let port = parse_port(std::env::var(PORT_ENV).ok().as_deref());
        let debug = parse_debug(std::env::var(DEBUG_ENV).ok().as_deref());
        Self { port, debug }
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(value) => match value.trim().parse::<u16>() {
            Ok(port) if port != 0 => port,
            _ => {
                eprintln!("Ignoring invalid {PORT_ENV}={value:?}; using {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        },
    }
}

fn parse_debug(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
    }
}
