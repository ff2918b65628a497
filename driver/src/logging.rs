use error_stack::{Report, ResultExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use kernel::KernelError;

static DEFAULT_FILTER: &str = "driver=debug,application=debug,kernel=debug";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogOutput {
    Stdout,
    /// Routes events through the test harness so they show up only for
    /// failing tests.
    TestCapture,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global fmt subscriber, filtered by `RUST_LOG`. Fails if a
/// global subscriber is already set.
pub fn init_logging(output: LogOutput) -> error_stack::Result<(), KernelError> {
    let registry = tracing_subscriber::registry();
    let installed = match output {
        LogOutput::Stdout => registry
            .with(tracing_subscriber::fmt::layer().with_filter(filter()))
            .try_init(),
        LogOutput::TestCapture => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter()),
            )
            .try_init(),
    };
    installed
        .map_err(Report::from)
        .change_context(KernelError::Internal)
        .attach_printable("failed to install the tracing subscriber")
}
