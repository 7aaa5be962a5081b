use api::app;
use api::state::AppState;
use grader::Grader;
use grader::error::GraderError;
use grader::executors::remote_runner::RemoteRunner;
use grader::stores::problem_bank::ProblemBank;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_appender::rolling;
use util::config::AppConfig;
use util::grading_config::GradingConfig;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let config = AppConfig::global().clone();
    let _log_guard = init_logging(&config.log_file, &config.log_level, config.log_to_stdout);

    // Set up collaborators
    let grading_config = GradingConfig::load(&config.grading_config_path)
        .map_err(GraderError::ConfigError)
        .inspect_err(|e| error!("{e}"))
        .expect("Failed to load grading config");

    let bank = ProblemBank::from_file(&config.problem_bank_path, config.fuzzy_match_threshold)
        .inspect_err(|e| error!("Failed to load problem bank {}: {e}", config.problem_bank_path))
        .expect("Failed to load problem bank");

    let runner = RemoteRunner::new(&config.runner_url, grading_config.runner.clone())
        .inspect_err(|e| error!("Failed to set up code runner: {e}"))
        .expect("Failed to set up code runner");

    info!(
        problems = bank.len(),
        runner = runner.execute_url(),
        comparison = ?grading_config.output.comparison,
        "Grader ready"
    );

    let grader = Grader::new(bank, runner, grading_config);
    let app = app(AppState::new(grader, config.runner_url.clone()));

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    info!(
        "Starting {} on http://{}:{} ({})",
        config.project_name, config.host, config.port, config.env
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Server crashed");
}

fn init_logging(
    log_file: &str,
    log_level: &str,
    log_to_stdout: bool,
) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("api=info,grader=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
