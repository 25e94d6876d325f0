use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tokio::sync::OnceCell;
use tracing::{info, warn};

#[async_trait]
pub(crate) trait ConnectionFactory: Send + Sync {
    type Connection: Clone + Send + Sync + 'static;

    async fn open(&self) -> Result<Self::Connection>;
    async fn close(&self, connection: Self::Connection);
}

/// Lazily opened, process-wide connection.
///
/// Concurrent first callers of [`Connector::connect`] share one in-flight
/// attempt. A failed attempt leaves the slot empty, so the next call starts
/// over.
pub(crate) struct Connector<F: ConnectionFactory> {
    factory: F,
    slot: Mutex<Arc<OnceCell<F::Connection>>>,
}

impl<F: ConnectionFactory> Connector<F> {
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            slot: Mutex::new(Arc::new(OnceCell::new())),
        }
    }

    pub(crate) async fn connect(&self) -> Result<F::Connection> {
        let cell = self.current();
        let connection = cell
            .get_or_try_init(|| async {
                info!("opening database connection");
                self.factory.open().await.inspect_err(|err| {
                    warn!(error = %err, "database connection attempt failed");
                })
            })
            .await?;
        Ok(connection.clone())
    }

    pub(crate) async fn shutdown(&self) {
        let previous = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *slot, Arc::new(OnceCell::new()))
        };

        // an attempt still in flight finishes into `previous`, wait for it
        let connection = previous
            .get_or_try_init(|| async { Err(anyhow!("connector is shutting down")) })
            .await
            .ok()
            .cloned();

        if let Some(connection) = connection {
            info!("closing database connection");
            self.factory.close(connection).await;
        }
    }

    fn current(&self) -> Arc<OnceCell<F::Connection>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MongoHandle {
    client: Client,
    database: Database,
}

impl MongoHandle {
    pub(crate) fn database(&self) -> &Database {
        &self.database
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MongoConnectionFactory {
    uri: String,
    database: String,
}

impl MongoConnectionFactory {
    pub(crate) fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }
}

#[async_trait]
impl ConnectionFactory for MongoConnectionFactory {
    type Connection = MongoHandle;

    async fn open(&self) -> Result<MongoHandle> {
        let client = Client::with_uri_str(&self.uri)
            .await
            .context("failed to parse MONGODB_URI")?;
        let database = client.database(&self.database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .with_context(|| format!("failed to reach database '{}'", self.database))?;

        info!(database = %self.database, "database connection established");
        Ok(MongoHandle { client, database })
    }

    async fn close(&self, connection: MongoHandle) {
        connection.client.shutdown().await;
    }
}

pub(crate) type MongoConnector = Connector<MongoConnectionFactory>;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    use super::{ConnectionFactory, Connector};

    #[derive(Default)]
    struct CountingFactory {
        opened: AtomicUsize,
        closed: AtomicUsize,
        failures_left: AtomicUsize,
    }

    impl CountingFactory {
        fn failing_first(times: usize) -> Self {
            Self {
                failures_left: AtomicUsize::new(times),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ConnectionFactory for CountingFactory {
        type Connection = usize;

        async fn open(&self) -> Result<usize> {
            let attempt = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;

            let should_fail = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            if should_fail {
                return Err(anyhow!("store unreachable"));
            }
            Ok(attempt)
        }

        async fn close(&self, _connection: usize) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn connect_reuses_cached_connection() {
        let connector = Connector::new(CountingFactory::default());

        let first = connector.connect().await.expect("connect must succeed");
        let second = connector.connect().await.expect("connect must succeed");

        assert_eq!(first, second);
        assert_eq!(connector.factory.opened.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_use_opens_single_connection() {
        let connector = Arc::new(Connector::new(CountingFactory::default()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let connector = Arc::clone(&connector);
                tokio::spawn(async move { connector.connect().await })
            })
            .collect();

        for handle in handles {
            let connection = handle
                .await
                .expect("task must not panic")
                .expect("connect must succeed");
            assert_eq!(connection, 1);
        }
        assert_eq!(connector.factory.opened.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_attempt_is_not_cached() {
        let connector = Connector::new(CountingFactory::failing_first(1));

        let err = connector.connect().await.expect_err("first attempt must fail");
        assert!(err.to_string().contains("store unreachable"));

        let connection = connector.connect().await.expect("retry must succeed");
        assert_eq!(connection, 2);
        assert_eq!(connector.factory.opened.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn shutdown_closes_and_next_connect_reopens() {
        let connector = Connector::new(CountingFactory::default());

        connector.connect().await.expect("connect must succeed");
        connector.shutdown().await;
        assert_eq!(connector.factory.closed.load(Ordering::SeqCst), 1);

        let reopened = connector.connect().await.expect("reconnect must succeed");
        assert_eq!(reopened, 2);
    }

    #[tokio::test]
    async fn shutdown_waits_for_in_flight_connect_and_closes_it() {
        let connector = Arc::new(Connector::new(CountingFactory::default()));

        let pending = {
            let connector = Arc::clone(&connector);
            tokio::spawn(async move { connector.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(connector.factory.opened.load(Ordering::SeqCst), 1);

        connector.shutdown().await;
        assert_eq!(connector.factory.closed.load(Ordering::SeqCst), 1);

        let connection = pending
            .await
            .expect("task must not panic")
            .expect("in-flight connect must succeed");
        assert_eq!(connection, 1);
    }

    #[tokio::test]
    async fn shutdown_without_connection_is_noop() {
        let connector = Connector::new(CountingFactory::default());
        connector.shutdown().await;

        assert_eq!(connector.factory.opened.load(Ordering::SeqCst), 0);
        assert_eq!(connector.factory.closed.load(Ordering::SeqCst), 0);
    }
}
