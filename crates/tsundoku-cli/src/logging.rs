use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. Verbosity: 0 = info, 1 = debug, 2+ = trace;
/// `-q` drops to errors only. `RUST_LOG` wins when set.
pub fn init(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
