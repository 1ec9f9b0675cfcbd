//! Process signals -> cancellation of the sync loop.

use std::future::pending;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Cancel `token` on Ctrl+C or SIGTERM.
///
/// Returns without doing anything once `token` is cancelled elsewhere. A
/// signal that cannot be listened for is logged and never fires.
pub async fn cancel_on_signal(token: CancellationToken) {
    let received = tokio::select! {
        () = token.cancelled() => return,
        name = interrupt() => name,
        name = terminate() => name,
    };
    tracing::info!("🛑 Received {}, shutting down...", received);
    token.cancel();
}

async fn interrupt() -> &'static str {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!("⚠️ Cannot listen for Ctrl+C: {}", e);
        pending::<()>().await;
    }
    "Ctrl+C"
}

#[cfg(unix)]
async fn terminate() -> &'static str {
    use signal::unix::SignalKind;

    match signal::unix::signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            if stream.recv().await.is_some() {
                return "SIGTERM";
            }
        }
        Err(e) => tracing::warn!("⚠️ Cannot listen for SIGTERM: {}", e),
    }
    pending().await
}

#[cfg(not(unix))]
async fn terminate() -> &'static str {
    pending().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_returns_once_token_is_cancelled() {
        let token = CancellationToken::new();
        let task = tokio::spawn(cancel_on_signal(token.clone()));

        token.cancel();
        let finished = tokio::time::timeout(Duration::from_secs(5), task).await;
        assert!(matches!(finished, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_parent_cancel_reaches_child_listener() {
        let parent = CancellationToken::new();
        let child = parent.child_token();
        parent.cancel();

        let finished =
            tokio::time::timeout(Duration::from_secs(5), cancel_on_signal(child.clone())).await;
        assert!(finished.is_ok());
        assert!(child.is_cancelled());
    }
}
