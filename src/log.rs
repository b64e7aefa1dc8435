use log::LevelFilter;

/// Initialise logging to stderr.
///
/// The default level is `Warn`, or `Debug` when `debug_enabled` is set. An explicit
/// `RUST_LOG` overrides both.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // A second initialisation (tests, embedding) keeps the first logger.
    if builder.try_init().is_ok() {
        log::debug!("logger initialised at {level:?} level");
    }
}
