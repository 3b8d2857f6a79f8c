//! Logging setup on top of the `log` facade

pub use log::{debug, error, info, trace, warn};

/// Install `env_logger` with `level` as the fallback filter.
///
/// `RUST_LOG` still wins when it is set. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        debug!("logger already initialized, keeping existing configuration");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_level("debug");
        init_with_level("warn");
        info!("logging initialized twice");
    }
}
