use cucumber::World;

pub mod common;
pub mod steps;

pub use common::world::PageWorld;

/// # Pagewright Integration Tests - Headless Page Testing
///
/// Drives the real `PageRuntime` over an `InMemoryPage` built from the landing
/// page fixture. Every scenario talks to the runtime the way a browser host
/// would: page events in, page state out.
///
/// ## Test Execution
///
/// ```bash
/// # Run all integration tests
/// cargo test --test integration_tests
///
/// # Show runtime logs
/// PAGEWRIGHT_LOG_LEVEL=debug cargo test --test integration_tests
/// ```
#[tokio::main]
async fn main() {
    // Initialize tracing with configurable log level
    #[allow(clippy::disallowed_methods)]
    let log_level = std::env::var("PAGEWRIGHT_LOG_LEVEL")
        .unwrap_or_else(|_| "error".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::ERROR, // Default to ERROR to reduce noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Tracing initialized successfully");

    run_features_sequentially().await;
}

/// Runs each feature file on its own so scenario output stays grouped by
/// feature
async fn run_features_sequentially() {
    let features = [
        "tests/features/scroll.feature",
        "tests/features/navigation.feature",
        "tests/features/reveal.feature",
        "tests/features/modal.feature",
        "tests/features/form.feature",
    ];

    tracing::info!("About to run {} feature files sequentially", features.len());

    for (i, feature) in features.iter().enumerate() {
        tracing::info!("[{}/{}] Starting {}", i + 1, features.len(), feature);
        PageWorld::run(feature).await;
        tracing::info!("[{}/{}] Completed {}", i + 1, features.len(), feature);
    }
}
