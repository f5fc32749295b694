/// Log level for the number of `-v` flags given.
pub fn level_filter(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

pub fn init_logger(verbosity: u8) {
    env_logger::Builder::new().filter_level(level_filter(verbosity)).init();
}
