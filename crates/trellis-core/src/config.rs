/// Process-wide configuration for Trellis applications.
#[derive(Debug, Clone)]
pub struct Config {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: crate::logging::DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling scopes are disabled
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to `puffin_viewer` over HTTP
    #[cfg(feature = "profiling")]
    WithServer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_logs_at_info_without_profiling() {
        let config = Config::default();
        assert_eq!(config.log_filter, crate::logging::DEFAULT_FILTER);
        assert_eq!(config.profiling, ProfilingMode::Off);
    }
}
