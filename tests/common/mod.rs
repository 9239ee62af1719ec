//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_tree::config::ClientConfig;
use api_tree::dispatch::{Notifier, SessionSupplier, ToastKind};
use api_tree::transport::{Transport, TransportFailure, TransportRequest, TransportResponse};
use api_tree::{Dispatcher, RouteTree};
use futures_util::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Outcome = Result<TransportResponse, TransportFailure>;

/// In-memory transport replaying scripted outcomes and recording requests.
/// The last outcome repeats once the script runs out.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    last: Mutex<Option<Outcome>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(outcomes.into()),
            ..Self::default()
        })
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Outcome> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        let outcome = match next {
            Some(outcome) => {
                *self.last.lock().unwrap() = Some(outcome.clone());
                outcome
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err(TransportFailure::new("script exhausted"))),
        };
        async move { outcome }.boxed()
    }
}

/// 200 response wrapping an envelope.
pub fn envelope(code: i64, message: &str, data: Value) -> Outcome {
    Ok(TransportResponse::ok(json!({
        "code": code,
        "message": message,
        "data": data,
    })))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowLoading(String),
    HideLoading,
    Toast(String, ToastKind),
}

/// Notifier recording every UI event.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Toast(message, kind) => Some((message, kind)),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show_loading(&self, title: &str) {
        self.events.lock().unwrap().push(UiEvent::ShowLoading(title.to_string()));
    }

    fn hide_loading(&self) {
        self.events.lock().unwrap().push(UiEvent::HideLoading);
    }

    fn show_toast(&self, message: &str, kind: ToastKind) {
        self.events
            .lock()
            .unwrap()
            .push(UiEvent::Toast(message.to_string(), kind));
    }
}

/// Session supplier numbering each refresh: `session-0`, `session-1`, ...
#[derive(Default)]
pub struct RefreshingSession {
    refreshes: AtomicUsize,
    force_flags: Mutex<Vec<bool>>,
}

impl RefreshingSession {
    pub fn force_flags(&self) -> Vec<bool> {
        self.force_flags.lock().unwrap().clone()
    }
}

impl SessionSupplier for RefreshingSession {
    fn session(&self, force_refresh: bool) -> BoxFuture<'_, Option<String>> {
        self.force_flags.lock().unwrap().push(force_refresh);
        let generation = if force_refresh {
            self.refreshes.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            self.refreshes.load(Ordering::SeqCst)
        };
        async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Some(format!("session-{}", generation))
        }
        .boxed()
    }
}

/// Everything a dispatcher test needs to inspect.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: Arc<RefreshingSession>,
    pub activity: Arc<AtomicUsize>,
    pub dispatcher: Arc<Dispatcher>,
}

impl Harness {
    pub fn new(config: ClientConfig, outcomes: Vec<Outcome>) -> Self {
        let transport = ScriptedTransport::new(outcomes);
        let notifier = Arc::new(RecordingNotifier::default());
        let session = Arc::new(RefreshingSession::default());
        let activity = Arc::new(AtomicUsize::new(0));

        let counter = activity.clone();
        let dispatcher = Dispatcher::new(config, transport.clone())
            .with_notifier(notifier.clone())
            .with_session(session.clone())
            .with_activity(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        Self {
            transport,
            notifier,
            session,
            activity,
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn tree(&self) -> RouteTree {
        RouteTree::new(self.dispatcher.clone())
    }

    pub fn activity_marks(&self) -> usize {
        self.activity.load(Ordering::SeqCst)
    }
}

/// Start a programmable HTTP backend. The handler receives the raw request
/// (head and body) and returns a status code and body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let raw = read_request(&mut socket).await;
                        let (status, body) = f(raw).await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
