//! Span definitions per operation: online batch, single update, offline refinement.

/// Create an online batch span.
#[macro_export]
macro_rules! online_batch_span {
    ($stage:expr, $max:expr) => {
        tracing::info_span!("swap.online", stage = %$stage, max_per_batch = $max)
    };
}

/// Create a span around one classification update.
#[macro_export]
macro_rules! update_span {
    ($agent:expr, $subject:expr) => {
        tracing::debug_span!("swap.update", agent = %$agent, subject = %$subject)
    };
}

/// Create an offline refinement span.
#[macro_export]
macro_rules! offline_span {
    ($agents:expr, $subjects:expr) => {
        tracing::info_span!("swap.offline", agents = $agents, subjects = $subjects)
    };
}
