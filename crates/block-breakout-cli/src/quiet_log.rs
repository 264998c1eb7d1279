use log::LevelFilter;

/// Silences the `log` macros while the alternate screen is up.
///
/// `env_logger` writes to stderr, which shares the terminal with the ratatui
/// frame. Problems during the session surface through `App::status` instead.
/// The previous level comes back on drop.
pub struct QuietLog {
    previous: LevelFilter,
}

impl QuietLog {
    pub fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(LevelFilter::Off);
        Self { previous }
    }
}

impl Drop for QuietLog {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutes_and_restores_level() {
        log::set_max_level(LevelFilter::Warn);

        {
            let _quiet = QuietLog::new();
            assert_eq!(log::max_level(), LevelFilter::Off);
            assert!(!log::log_enabled!(log::Level::Error));
        }

        assert_eq!(log::max_level(), LevelFilter::Warn);
    }
}
