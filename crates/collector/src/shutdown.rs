use tokio::sync::watch;

/// Cooperative shutdown signal shared by all job loops. Jobs check it before
/// starting an invocation; nothing new is initiated once it fired, and
/// whatever store transaction is open when the process winds down rolls back
/// on drop.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Reacts to SIGINT/SIGTERM from the OS.
    pub fn on_os_signal() -> Self {
        let (sender, receiver) = watch::channel(false);
        tokio::spawn(wait_for_signal(sender));
        Self { receiver }
    }

    /// A signal that can be triggered manually, for tests and embedding.
    pub fn manual() -> (watch::Sender<bool>, Self) {
        let (sender, receiver) = watch::channel(false);
        (sender, Self { receiver })
    }

    /// Non-blocking check whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once shutdown is requested.
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                // sender gone; treat as shutdown
                return;
            }
        }
    }
}

async fn wait_for_signal(sender: watch::Sender<bool>) {
    #[cfg(unix)]
    {
        use tokio::{signal, signal::unix};
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => tracing::info!("received SIGINT"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM"),
                }
            }
            Err(err) => {
                tracing::error!(?err, "failed to install SIGTERM handler");
                let _ = signal::ctrl_c().await;
                tracing::info!("received SIGINT");
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received SIGINT");
    }

    let _ = sender.send(true);
}
