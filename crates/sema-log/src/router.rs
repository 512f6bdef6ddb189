//! Topic routing and the tail loop.
//!
//! A [`TopicRouter`] maps topics to handlers, then [`TopicRouter::run`]
//! subscribes a consumer to the routed topics and dispatches every inbound
//! record until the returned [`TailHandle`] is stopped.
//!
//! Handler failures are logged and the record is skipped; no retry, no
//! dead-lettering. Upstream corrections arrive as newer records, so a
//! malformed record is not worth holding the tail for.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use sema_core::observability::consume_span;

use crate::consumer::LogConsumer;
use crate::error::{Error, Result};
use crate::record::Record;

/// Delay before re-polling after a transport error.
const POLL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Error type handlers may return; converted to a log line, never retried.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

type Handler = Box<dyn Fn(&Record) -> std::result::Result<(), HandlerError> + Send + Sync>;

/// Routes inbound records to per-topic handlers.
#[derive(Default)]
pub struct TopicRouter {
    routes: HashMap<String, Handler>,
}

impl std::fmt::Debug for TopicRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicRouter")
            .field("topics", &self.topics())
            .finish()
    }
}

impl TopicRouter {
    /// Creates a router with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a topic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteExists`] when the topic already has a handler.
    /// Double registration is a programming error, not a runtime condition.
    pub fn new_route<F>(&mut self, topic: impl Into<String>, handler: F) -> Result<()>
    where
        F: Fn(&Record) -> std::result::Result<(), HandlerError> + Send + Sync + 'static,
    {
        let topic = topic.into();
        if self.routes.contains_key(&topic) {
            return Err(Error::RouteExists { topic });
        }
        self.routes.insert(topic, Box::new(handler));
        Ok(())
    }

    /// Returns the routed topics in arbitrary order.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.routes.keys().cloned().collect()
    }

    /// Dispatches one record to its topic's handler.
    ///
    /// Records for unrouted topics and handler failures are logged and
    /// dropped.
    pub fn dispatch(&self, record: &Record) {
        let span = consume_span(&record.topic, record.offset);
        let _guard = span.enter();

        let Some(handler) = self.routes.get(&record.topic) else {
            tracing::debug!("no route for topic, record dropped");
            return;
        };
        if let Err(error) = handler(record) {
            tracing::warn!(error = %error, "handler rejected record, skipping");
        }
    }

    /// Subscribes the consumer to the routed topics and starts the tail.
    ///
    /// The tail processes records serially in the order the consumer
    /// delivers them. It runs until the returned handle is stopped; a stop
    /// lets the in-flight record finish, then closes the consumer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRoutes`] when nothing was routed, or a transport
    /// error if the subscription fails.
    pub async fn run<C: LogConsumer>(self, mut consumer: C) -> Result<TailHandle> {
        if self.routes.is_empty() {
            return Err(Error::NoRoutes);
        }

        let topics = self.topics();
        consumer.subscribe(&topics).await?;
        tracing::info!(topics = ?topics, "log tail started");

        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(tail_loop(self, consumer, stop_rx));

        Ok(TailHandle {
            stop: stop_tx,
            join,
        })
    }
}

async fn tail_loop<C: LogConsumer>(
    router: TopicRouter,
    mut consumer: C,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut stop => break,
            next = consumer.next_record() => match next {
                Ok(Some(record)) => router.dispatch(&record),
                Ok(None) => {
                    tracing::info!("log stream ended, stopping tail");
                    break;
                }
                Err(error) => {
                    tracing::warn!(error = %error, "log poll failed");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                }
            },
        }
    }
    consumer.close();
    tracing::info!("log tail stopped");
}

/// Handle to a running tail.
#[derive(Debug)]
pub struct TailHandle {
    stop: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl TailHandle {
    /// Stops the tail and waits for it to wind down.
    ///
    /// The in-flight record, if any, is processed to completion before the
    /// underlying consumer is closed.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }

    /// Returns true when the tail has already wound down on its own.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLog;
    use crate::producer::LogProducer;
    use bytes::Bytes;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn double_registration_is_rejected() {
        let mut router = TopicRouter::new();
        router.new_route("schema_update", |_| Ok(())).unwrap();
        let err = router.new_route("schema_update", |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::RouteExists { topic } if topic == "schema_update"));
    }

    #[test]
    fn dispatch_ignores_unrouted_topics() {
        let router = TopicRouter::new();
        router.dispatch(&Record::new("unknown", Bytes::new()));
    }

    #[tokio::test]
    async fn run_without_routes_fails() {
        let log = InMemoryLog::new();
        let router = TopicRouter::new();
        let err = router.run(log.consumer()).await.unwrap_err();
        assert!(matches!(err, Error::NoRoutes));
    }

    #[tokio::test]
    async fn tail_delivers_records_in_order() -> Result<()> {
        let log = InMemoryLog::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut router = TopicRouter::new();
        let sink = Arc::clone(&seen);
        router.new_route("numbers", move |record: &Record| {
            sink.lock().unwrap().push(record.payload.clone());
            Ok(())
        })?;

        let handle = router.run(log.consumer()).await?;
        for n in 0..5u8 {
            log.publish("numbers", Bytes::from(vec![n])).await?;
        }

        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                if seen.lock().unwrap().len() == 5 {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("tail should deliver all records");

        let payloads = seen.lock().unwrap().clone();
        let expected: Vec<Bytes> = (0..5u8).map(|n| Bytes::from(vec![n])).collect();
        assert_eq!(payloads, expected);

        handle.stop().await;
        Ok(())
    }

    #[tokio::test]
    async fn handler_errors_skip_the_record() -> Result<()> {
        let log = InMemoryLog::new();
        let handled = Arc::new(AtomicUsize::new(0));

        let mut router = TopicRouter::new();
        let counter = Arc::clone(&handled);
        router.new_route("flaky", move |record: &Record| {
            counter.fetch_add(1, Ordering::SeqCst);
            if record.payload.is_empty() {
                return Err("empty payload".into());
            }
            Ok(())
        })?;

        let handle = router.run(log.consumer()).await?;
        log.publish("flaky", Bytes::new()).await?;
        log.publish("flaky", Bytes::from_static(b"ok")).await?;

        tokio::time::timeout(Duration::from_secs(1), async {
            while handled.load(Ordering::SeqCst) < 2 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("both records should reach the handler");

        handle.stop().await;
        Ok(())
    }

    #[tokio::test]
    async fn stop_closes_the_consumer() -> Result<()> {
        let log = InMemoryLog::new();
        let mut router = TopicRouter::new();
        router.new_route("t", |_| Ok(()))?;

        let handle = router.run(log.consumer()).await?;
        assert!(!handle.is_finished());
        handle.stop().await;
        Ok(())
    }
}
