//! Run configuration

use std::path::PathBuf;
use std::time::Duration;

/// Timeouts and output location for a cloning run.
///
/// The defaults are what the `blecloner` binary uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long to listen for advertisements before listing devices
    pub scan_window: Duration,
    /// How long to scan when looking the selected device up again
    pub lookup_timeout: Duration,
    /// How long to wait for a connection and its attribute table
    pub connect_timeout: Duration,
    /// Directory the sketch folder is created in
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scan_window: Duration::from_secs(10),
            lookup_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(120),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Sets the listening window
    pub fn with_scan_window(mut self, window: Duration) -> Self {
        self.scan_window = window;
        self
    }

    /// Sets the lookup timeout
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Sets the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_cli() {
        let config = Config::default();
        assert_eq!(config.scan_window, Duration::from_secs(10));
        assert_eq!(config.lookup_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(120));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn setters_chain() {
        let config = Config::default()
            .with_scan_window(Duration::from_millis(50))
            .with_output_dir("/tmp/sketches");
        assert_eq!(config.scan_window, Duration::from_millis(50));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/sketches"));
        assert_eq!(config.connect_timeout, Duration::from_secs(120));
    }
}
