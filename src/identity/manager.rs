use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::client::IdentityClient;
use super::error::LifecycleError;
use crate::config::Settings;

#[derive(Default)]
struct Slot {
    client: Option<Arc<IdentityClient>>,
    /// Outcome of the most recent construction attempt that failed.
    last_failure: Option<LifecycleError>,
}

/// Owns at most one live [`IdentityClient`] and hands out shared access to it.
///
/// The handle is built lazily on the first [`get_client`](Self::get_client) and
/// reused until [`close_client`](Self::close_client). Construction runs under
/// the write lock, so concurrent first callers wait for a single construction
/// instead of racing their own. Callers that were already waiting when an
/// attempt failed get that failure back rather than starting another
/// handshake. A cancelled attempt records nothing; the next caller tries again.
pub struct ClientManager {
    settings: Arc<Settings>,
    slot: RwLock<Slot>,
    failed_attempts: AtomicU64,
}

impl ClientManager {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            slot: RwLock::new(Slot::default()),
            failed_attempts: AtomicU64::new(0),
        }
    }

    /// Returns the shared client, constructing it first if there is none.
    pub async fn get_client(&self) -> Result<Arc<IdentityClient>, LifecycleError> {
        let seen_failures = self.failed_attempts.load(Ordering::Acquire);
        if let Some(client) = self.slot.read().await.client.as_ref() {
            return Ok(client.clone());
        }

        let mut slot = self.slot.write().await;
        if let Some(client) = slot.client.as_ref() {
            debug!("Identity client was initialized by a concurrent caller.");
            return Ok(client.clone());
        }
        if self.failed_attempts.load(Ordering::Acquire) != seen_failures {
            if let Some(err) = slot.last_failure.clone() {
                debug!("Identity client construction failed while this caller waited: {}", err);
                return Err(err);
            }
        }

        match IdentityClient::connect(&self.settings).await {
            Ok(client) => {
                let client = Arc::new(client);
                info!(
                    service_url = client.base_url().as_str(),
                    "Identity service client initialized."
                );
                slot.client = Some(client.clone());
                slot.last_failure = None;
                Ok(client)
            }
            Err(err) => {
                warn!("Identity service client construction failed: {}", err);
                slot.last_failure = Some(err.clone());
                self.failed_attempts.fetch_add(1, Ordering::Release);
                Err(err)
            }
        }
    }

    /// Drops the cached client. Callers still holding an `Arc` keep a working
    /// handle; the next `get_client` builds a fresh one.
    pub async fn close_client(&self) -> Result<(), LifecycleError> {
        let mut slot = self.slot.write().await;
        match slot.client.take() {
            Some(_) => {
                info!("Identity service client closed.");
                Ok(())
            }
            None => Err(LifecycleError::Uninitialized),
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.slot.read().await.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use mockito::Server;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;
    use tokio::time::timeout;

    fn manager_for(url: &str) -> Arc<ClientManager> {
        Arc::new(ClientManager::new(Arc::new(Settings {
            service_url: url.to_string(),
            service_secret_key: "service-secret".to_string(),
            request_timeout_ms: 2000,
            ..Settings::default()
        })))
    }

    fn manager_with_timeout(url: &str, request_timeout_ms: u64) -> Arc<ClientManager> {
        Arc::new(ClientManager::new(Arc::new(Settings {
            service_url: url.to_string(),
            service_secret_key: "service-secret".to_string(),
            request_timeout_ms,
            ..Settings::default()
        })))
    }

    /// A service that accepts connections and never answers them.
    /// Returns its URL and a count of accepted connections.
    async fn silent_service() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                held.push(socket);
            }
        });
        (format!("http://{}", addr), accepted)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_construction() {
        let mut server = Server::new_async().await;
        let health = server
            .mock("GET", "/auth/v1/health")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let manager = manager_for(&server.url());

        let handles = (0..16).map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.get_client().await })
        });
        let clients: Vec<Arc<IdentityClient>> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.expect("task panicked").expect("client should connect"))
            .collect();

        health.assert_async().await;
        assert_eq!(clients.len(), 16);
        assert!(clients.iter().all(|c| Arc::ptr_eq(c, &clients[0])));
    }

    #[tokio::test]
    async fn test_close_uninitialized_fails() {
        let manager = manager_for("http://127.0.0.1:1");
        let result = manager.close_client().await;
        assert!(matches!(result, Err(LifecycleError::Uninitialized)));
    }

    #[tokio::test]
    async fn test_close_then_reconstruct() {
        let mut server = Server::new_async().await;
        let health = server
            .mock("GET", "/auth/v1/health")
            .with_status(200)
            .expect(2)
            .create_async()
            .await;
        let manager = manager_for(&server.url());

        let first = manager.get_client().await.unwrap();
        assert!(manager.is_initialized().await);
        manager.close_client().await.unwrap();
        assert!(!manager.is_initialized().await);
        assert!(matches!(
            manager.close_client().await,
            Err(LifecycleError::Uninitialized)
        ));

        let second = manager.get_client().await.unwrap();
        health.assert_async().await;
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failed_construction_leaves_slot_empty() {
        let mut server = Server::new_async().await;
        let down = server
            .mock("GET", "/auth/v1/health")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;
        let manager = manager_for(&server.url());

        for _ in 0..2 {
            assert!(matches!(
                manager.get_client().await,
                Err(LifecycleError::Handshake(_))
            ));
            assert!(!manager.is_initialized().await);
        }
        down.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_waiting_callers_share_a_failed_attempt() {
        let (url, accepted) = silent_service().await;
        let manager = manager_with_timeout(&url, 300);

        let started = Instant::now();
        let handles = (0..5).map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.get_client().await.map(|_| ()) })
        });
        let results: Vec<Result<(), LifecycleError>> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.expect("task panicked"))
            .collect();
        let elapsed = started.elapsed();

        assert!(results
            .iter()
            .all(|r| matches!(r, Err(LifecycleError::Handshake(_)))));
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
        assert!(
            elapsed < Duration::from_millis(900),
            "callers waited {:?}, expected about one request timeout",
            elapsed
        );
        assert!(!manager.is_initialized().await);
    }

    #[tokio::test]
    async fn test_abandoned_construction_leaves_manager_usable() {
        let (url, accepted) = silent_service().await;
        let manager = manager_with_timeout(&url, 5000);

        let abandoned = timeout(Duration::from_millis(200), manager.get_client()).await;
        assert!(abandoned.is_err());

        let initialized = timeout(Duration::from_millis(200), manager.is_initialized()).await;
        assert_eq!(initialized.ok(), Some(false));
        assert!(matches!(
            manager.close_client().await,
            Err(LifecycleError::Uninitialized)
        ));

        // The abandoned attempt recorded no failure, so the next caller starts its own.
        let retried = timeout(Duration::from_millis(200), manager.get_client()).await;
        assert!(retried.is_err());
        assert_eq!(accepted.load(Ordering::SeqCst), 2);
    }
}
