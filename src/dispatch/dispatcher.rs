//! Request lifecycle: configuration merge, auth, transport call, response
//! classification and session re-authentication.
//!
//! # State Transitions
//! ```text
//! Authenticated → (code 401) → Reauthenticating → (retry, at most 3) → Authenticated | Exhausted
//! ```
//! An exhausted retry budget surfaces the last 401 as a business error.

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::dispatch::collaborators::{
    ActivityHook, NoActivity, Notifier, SessionSupplier, StaticSession, ToastKind, TracingNotifier,
};
use crate::dispatch::types::{
    set_header, RequestConfig, ResolvedConfig, ResponseEnvelope, REQUEST_ID_HEADER,
    SESSION_EXPIRED_CODE, SESSION_HEADER,
};
use crate::error::{RequestError, RequestResult};
use crate::observability::metrics;
use crate::routing::spec::Verb;
use crate::routing::url::{build_url, Params};
use crate::transport::client::DOMAIN_LIST_FAILURE;
use crate::transport::{Transport, TransportRequest};

/// Maximum number of re-authentication retries per call.
pub const MAX_REAUTH_ATTEMPTS: u32 = 3;

/// Toast shown when the platform refuses the request host.
pub const DOMAIN_WARNING: &str = "Request url is not in the allowed domain list, enable debug mode";

/// Executes logical requests against the configured backend.
pub struct Dispatcher {
    config: ArcSwap<ClientConfig>,
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionSupplier>,
    notifier: Arc<dyn Notifier>,
    activity: Arc<dyn ActivityHook>,
}

struct Attempt {
    envelope: ResponseEnvelope<Value>,
    show_toast: bool,
}

impl Dispatcher {
    /// Create a dispatcher. The session supplier defaults to the configured
    /// static key, the notifier to tracing events, the activity hook to a no-op.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let session = Arc::new(StaticSession::new(config.session.token.clone()));
        Self {
            config: ArcSwap::from_pointee(config),
            transport,
            session,
            notifier: Arc::new(TracingNotifier),
            activity: Arc::new(NoActivity),
        }
    }

    pub fn with_session(mut self, session: Arc<dyn SessionSupplier>) -> Self {
        self.session = session;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_activity(mut self, activity: Arc<dyn ActivityHook>) -> Self {
        self.activity = activity;
        self
    }

    /// Snapshot of the process-wide configuration.
    pub fn config(&self) -> Arc<ClientConfig> {
        self.config.load_full()
    }

    /// Atomically replace the process-wide configuration.
    /// Calls already in flight finish their current attempt with the old snapshot.
    pub fn update_config(&self, config: ClientConfig) {
        tracing::info!(base_url = %config.base_url, "Client configuration replaced");
        self.config.store(Arc::new(config));
    }

    /// Execute one logical request, re-authenticating on expired sessions.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &Params,
        body: Option<&Value>,
        verb: Verb,
        config: &RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("dispatch", %request_id, %verb, url = %url);
        let started = Instant::now();

        let result = self
            .run(request_id, url, params, body, verb, config)
            .instrument(span)
            .await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_request(outcome, started.elapsed());
        result
    }

    async fn run<T: DeserializeOwned>(
        &self,
        request_id: Uuid,
        url: &str,
        params: &Params,
        body: Option<&Value>,
        verb: Verb,
        config: &RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        let mut re_auth = config.re_auth.unwrap_or(false);
        let mut retry_count = 0;

        loop {
            let attempt = self
                .attempt(request_id, url, params, body, verb, config, re_auth)
                .await?;
            let envelope = attempt.envelope;

            if envelope.code == SESSION_EXPIRED_CODE && retry_count < MAX_REAUTH_ATTEMPTS {
                retry_count += 1;
                re_auth = true;
                metrics::record_reauth_attempt();
                tracing::info!(attempt = retry_count, "Session expired, re-authenticating");
                continue;
            }

            if !envelope.is_accepted() {
                tracing::warn!(code = envelope.code, message = %envelope.message, "Business error");
                if attempt.show_toast {
                    self.notifier.show_toast(&envelope.message, ToastKind::Plain);
                }
                return Err(RequestError::Business {
                    code: envelope.code,
                    message: envelope.message,
                });
            }

            let typed = envelope.decode::<T>()?;
            self.activity.mark_activity();
            tracing::debug!(code = typed.code, retries = retry_count, "Request succeeded");
            return Ok(typed);
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn attempt(
        &self,
        request_id: Uuid,
        url: &str,
        params: &Params,
        body: Option<&Value>,
        verb: Verb,
        config: &RequestConfig,
        re_auth: bool,
    ) -> RequestResult<Attempt> {
        let client = self.config.load_full();
        let mut settings = ResolvedConfig::merge(&client, config);
        settings.re_auth = re_auth;

        let request_url = build_url(&settings.base_url, url, params)?;

        let mut headers = settings.headers;
        set_header(&mut headers, REQUEST_ID_HEADER, request_id.to_string());

        if settings.use_auth && !client.is_whitelisted(url) {
            match self.session.session(settings.re_auth).await {
                Some(token) => {
                    set_header(&mut headers, SESSION_HEADER, token);
                }
                None => tracing::debug!("No session available, sending without session key"),
            }
        }

        if settings.show_loading {
            self.notifier.show_loading(&settings.loading_title);
        }

        tracing::debug!(url = %request_url, re_auth = settings.re_auth, "Sending request");
        let outcome = self
            .transport
            .send(TransportRequest {
                url: request_url,
                method: verb,
                headers,
                body: body.cloned(),
            })
            .await;

        if settings.show_loading {
            self.notifier.hide_loading();
        }

        let response = match outcome {
            Ok(response) => response,
            Err(failure) => {
                tracing::warn!(error = %failure, "Transport failure");
                if failure.message.contains(DOMAIN_LIST_FAILURE) && settings.show_toast {
                    self.notifier.show_toast(DOMAIN_WARNING, ToastKind::Plain);
                }
                return Err(RequestError::Transport(failure.message));
            }
        };

        if response.status != 200 {
            tracing::warn!(status = response.status, "Server returned non-200 status");
            if settings.show_toast {
                self.notifier
                    .show_toast(&format!("Server {} error", response.status), ToastKind::Error);
            }
            return Err(RequestError::HttpStatus {
                status: response.status,
            });
        }

        Ok(Attempt {
            envelope: ResponseEnvelope::from_body(response.data)?,
            show_toast: settings.show_toast,
        })
    }

    /// GET helper.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &Params,
        body: Option<&Value>,
        config: &RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.execute(url, params, body, Verb::Get, config).await
    }

    /// POST helper.
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &Params,
        body: Option<&Value>,
        config: &RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.execute(url, params, body, Verb::Post, config).await
    }

    /// PUT helper.
    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &Params,
        body: Option<&Value>,
        config: &RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.execute(url, params, body, Verb::Put, config).await
    }

    /// DELETE helper.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &Params,
        body: Option<&Value>,
        config: &RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.execute(url, params, body, Verb::Delete, config).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config.load();
        f.debug_struct("Dispatcher")
            .field("base_url", &config.base_url)
            .field("auth_whitelist", &config.auth_whitelist)
            .finish()
    }
}
