use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(err) = phpgen::cli::run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
