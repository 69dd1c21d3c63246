/// Default filter when `RUST_LOG` is not set.
pub fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install `env_logger` on stderr. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().filter_or("RUST_LOG", default_level(verbose));

    // A second call (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(verbose)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), "debug");
        assert_eq!(default_level(false), "warn");
    }
}
