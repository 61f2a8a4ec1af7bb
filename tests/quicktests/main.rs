mod parented;

/// Routes the crate's `log` output through the test harness so it shows up for failing
/// properties. Safe to call from every test; only the first call installs the logger.
pub(crate) fn init_logging() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}
