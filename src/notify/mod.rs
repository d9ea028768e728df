use async_trait::async_trait;

/// Cache-invalidation signal emitted after each successful mutation.
/// Fire-and-forget: the engine never waits on or inspects the outcome.
#[async_trait]
pub trait InvalidationHook: Send + Sync {
    async fn invalidate(&self, paths: &[String]);
}

/// Default hook: surfaces the changed resource paths to the log stream,
/// where the presenting layer's refresher picks them up.
#[derive(Clone, Default)]
pub struct LogInvalidator;

#[async_trait]
impl InvalidationHook for LogInvalidator {
    async fn invalidate(&self, paths: &[String]) {
        for path in paths {
            tracing::debug!(path = %path, "resource invalidated");
        }
    }
}
