/// Endpoint polled when neither the CLI nor a config file names one.
pub(crate) const DEFAULT_URL: &str = "http://localhost:9001/color";
/// Seconds between attempts.
pub(crate) const DEFAULT_INTERVAL: &str = "0.5";
/// Per-request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT: &str = "1";
/// Config filenames picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["restpoll.toml", "restpoll.json"];

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("restpoll/", env!("CARGO_PKG_VERSION"));
