use tracing_subscriber::EnvFilter;

pub fn init(verbose: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    EnvFilter::new(match verbose {
      0 => "warn",
      1 => "debug",
      _ => "trace",
    })
  });

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .try_init();
}
