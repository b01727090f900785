use std::fmt::Display;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{ChatRequest, UpstreamRequest};
use crate::upstream::UpstreamClient;

/// Chunks the pump may hold ahead of a slow client.
const RELAY_BUFFER: usize = 16;

type RelayItem = Result<Bytes, io::Error>;

#[derive(Clone)]
pub struct RelayService {
    upstream: UpstreamClient,
    upstream_url: Option<String>,
}

impl RelayService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let upstream = UpstreamClient::new(config.connect_timeout, config.relay_timeout)?;
        Ok(Self { upstream, upstream_url: config.upstream_url.clone() })
    }

    /// Forwards `request` upstream and, once the upstream has answered with a
    /// success status, returns a live stream of its body.
    pub async fn open_stream(&self, request: ChatRequest) -> Result<RelayStream, AppError> {
        let url = self
            .upstream_url
            .as_deref()
            .ok_or(AppError::UpstreamNotConfigured)?;

        let span = info_span!("relay", request_id = %Uuid::new_v4());
        let payload = UpstreamRequest::from(request);

        let response = self
            .upstream
            .open(url, &payload)
            .instrument(span.clone())
            .await?;

        span.in_scope(|| info!("Upstream accepted the request, streaming body"));
        Ok(spawn_relay(response.bytes_stream(), span))
    }
}

/// Receiving half of a relay. Dropping it aborts the pump, which drops the
/// upstream body and with it the upstream connection.
pub struct RelayStream {
    rx: mpsc::Receiver<RelayItem>,
    pump: JoinHandle<()>,
}

impl Stream for RelayStream {
    type Item = RelayItem;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for RelayStream {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Starts copying `upstream` into a bounded channel on a background task and
/// returns the reading end.
pub fn spawn_relay<S, E>(upstream: S, span: tracing::Span) -> RelayStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let (tx, rx) = mpsc::channel(RELAY_BUFFER);
    let pump = tokio::spawn(pump(upstream, tx).instrument(span));
    RelayStream { rx, pump }
}

async fn pump<S, E>(upstream: S, tx: mpsc::Sender<RelayItem>)
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut upstream = std::pin::pin!(upstream);
    let mut chunks = 0usize;
    let mut bytes = 0usize;

    while let Some(item) = upstream.next().await {
        match item {
            Ok(chunk) => {
                chunks += 1;
                bytes += chunk.len();
                if tx.send(Ok(chunk)).await.is_err() {
                    warn!("Client went away after {chunks} chunks, dropping upstream body");
                    return;
                }
            }
            Err(e) => {
                error!("Upstream body failed after {chunks} chunks: {e}");
                // Surfaces as an aborted response body on the client side.
                let _ = tx.send(Err(io::Error::other(e.to_string()))).await;
                return;
            }
        }
    }

    debug!(chunks, bytes, "Upstream body exhausted, closing relay");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::stream;
    use tokio::sync::oneshot;

    use super::*;

    fn ok_chunks(parts: &[&'static str]) -> Vec<Result<Bytes, io::Error>> {
        parts.iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))).collect()
    }

    #[tokio::test]
    async fn relays_chunks_in_arrival_order() {
        let parts = ["data: {\"response\":\"A\"}\n", "data: {\"resp", "onse\":\"B\"}\n", "data: [DONE]"];
        let relay = spawn_relay(stream::iter(ok_chunks(&parts)), tracing::Span::none());

        let received: Vec<Bytes> = relay
            .map(|item| item.expect("no mid-stream error"))
            .collect()
            .await;

        let expected: Vec<Bytes> = parts.iter().map(|p| Bytes::from_static(p.as_bytes())).collect();
        assert_eq!(received, expected);
    }

    #[tokio::test]
    async fn empty_upstream_closes_cleanly() {
        let relay = spawn_relay(
            stream::iter(Vec::<Result<Bytes, io::Error>>::new()),
            tracing::Span::none(),
        );
        let received: Vec<RelayItem> = relay.collect().await;
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_aborts_the_channel() {
        let mut items = ok_chunks(&["first"]);
        items.push(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")));
        items.extend(ok_chunks(&["never relayed"]));

        let mut relay = spawn_relay(stream::iter(items), tracing::Span::none());

        assert_eq!(relay.next().await.unwrap().unwrap(), Bytes::from_static(b"first"));
        let err = relay.next().await.unwrap().unwrap_err();
        assert!(err.to_string().contains("reset by peer"));
        assert!(relay.next().await.is_none());
    }

    #[tokio::test]
    async fn dropping_the_client_side_cancels_the_upstream_read() {
        let (alive_tx, alive_rx) = oneshot::channel::<()>();
        let upstream = stream::once(async move {
            let _alive = alive_tx;
            futures_util::future::pending::<Result<Bytes, io::Error>>().await
        });

        let relay = spawn_relay(upstream, tracing::Span::none());
        tokio::task::yield_now().await;
        drop(relay);

        let dropped = tokio::time::timeout(Duration::from_secs(1), alive_rx)
            .await
            .expect("upstream was not released");
        assert!(dropped.is_err());
    }
}
