/// Initializes the global logger.
///
/// Pipeline stage transitions are logged at debug level, so `verbose` shows them.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .init();
}
