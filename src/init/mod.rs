mod logging;
pub use logging::init_tracing;

mod notifier;
pub use notifier::init_notifier;
