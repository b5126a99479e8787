use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "tripe_engine=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix lines with the emitting thread's name.
    pub thread_names: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            thread_names: true,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then `info` with
/// the noisy wgpu internals held at `warn`.
/// Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder
                .filter_level(log::LevelFilter::Info)
                .filter_module("wgpu_core", log::LevelFilter::Warn)
                .filter_module("wgpu_hal", log::LevelFilter::Warn)
                .filter_module("naga", log::LevelFilter::Warn);
        }

        builder.write_style(config.write_style);

        if config.thread_names {
            builder.format(|buf, record| {
                use std::io::Write;
                let thread = std::thread::current();
                writeln!(
                    buf,
                    "[{} {:5} {} {}] {}",
                    buf.timestamp_millis(),
                    record.level(),
                    thread.name().unwrap_or("?"),
                    record.target(),
                    record.args()
                )
            });
        }

        // Tests may race to install a logger; losing that race is fine.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
