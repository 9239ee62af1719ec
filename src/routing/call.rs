//! Shape-typed call handles bound to a route.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::dispatch::{Dispatcher, RequestConfig, ResponseEnvelope};
use crate::error::RequestResult;
use crate::routing::spec::{CallShape, PathSpec, Verb};
use crate::routing::url::Params;

#[derive(Clone)]
struct Target {
    dispatcher: Arc<Dispatcher>,
    url: String,
    verb: Verb,
}

impl Target {
    async fn dispatch<T: DeserializeOwned>(
        &self,
        params: &Params,
        body: Option<&Value>,
        config: &RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.dispatcher
            .execute(&self.url, params, body, self.verb, config)
            .await
    }
}

/// Endpoint taking query params only (`P` marker).
#[derive(Clone)]
pub struct ParamsCall(Target);

impl ParamsCall {
    pub async fn call<T: DeserializeOwned>(
        &self,
        params: Params,
        config: RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.0.dispatch(&params, None, &config).await
    }
}

/// Endpoint taking a body only (`B` marker).
#[derive(Clone)]
pub struct BodyCall(Target);

impl BodyCall {
    pub async fn call<T: DeserializeOwned>(
        &self,
        body: Option<Value>,
        config: RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.0.dispatch(&Params::new(), body.as_ref(), &config).await
    }
}

/// Endpoint taking no data (`Z` marker).
#[derive(Clone)]
pub struct NoArgsCall(Target);

impl NoArgsCall {
    pub async fn call<T: DeserializeOwned>(
        &self,
        config: RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.0.dispatch(&Params::new(), None, &config).await
    }
}

/// Endpoint taking params and body (no marker).
#[derive(Clone)]
pub struct FullCall(Target);

impl FullCall {
    pub async fn call<T: DeserializeOwned>(
        &self,
        params: Params,
        body: Option<Value>,
        config: RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.0.dispatch(&params, body.as_ref(), &config).await
    }
}

/// The call a route node is bound to, typed by its shape.
#[derive(Clone)]
pub enum BoundCall {
    ParamsOnly(ParamsCall),
    BodyOnly(BodyCall),
    NoArgs(NoArgsCall),
    ParamsAndBody(FullCall),
}

impl BoundCall {
    /// Bind a path spec to a dispatcher.
    pub fn bind(spec: &PathSpec, dispatcher: Arc<Dispatcher>) -> Self {
        let target = Target {
            dispatcher,
            url: spec.url.clone(),
            verb: spec.verb,
        };
        match spec.shape {
            CallShape::ParamsOnly => BoundCall::ParamsOnly(ParamsCall(target)),
            CallShape::BodyOnly => BoundCall::BodyOnly(BodyCall(target)),
            CallShape::NoArgs => BoundCall::NoArgs(NoArgsCall(target)),
            CallShape::ParamsAndBody => BoundCall::ParamsAndBody(FullCall(target)),
        }
    }

    fn target(&self) -> &Target {
        match self {
            BoundCall::ParamsOnly(c) => &c.0,
            BoundCall::BodyOnly(c) => &c.0,
            BoundCall::NoArgs(c) => &c.0,
            BoundCall::ParamsAndBody(c) => &c.0,
        }
    }

    pub fn shape(&self) -> CallShape {
        match self {
            BoundCall::ParamsOnly(_) => CallShape::ParamsOnly,
            BoundCall::BodyOnly(_) => CallShape::BodyOnly,
            BoundCall::NoArgs(_) => CallShape::NoArgs,
            BoundCall::ParamsAndBody(_) => CallShape::ParamsAndBody,
        }
    }

    /// Request path the call is dispatched to.
    pub fn url(&self) -> &str {
        &self.target().url
    }

    pub fn verb(&self) -> Verb {
        self.target().verb
    }

    pub fn params_only(&self) -> Option<&ParamsCall> {
        match self {
            BoundCall::ParamsOnly(c) => Some(c),
            _ => None,
        }
    }

    pub fn body_only(&self) -> Option<&BodyCall> {
        match self {
            BoundCall::BodyOnly(c) => Some(c),
            _ => None,
        }
    }

    pub fn no_args(&self) -> Option<&NoArgsCall> {
        match self {
            BoundCall::NoArgs(c) => Some(c),
            _ => None,
        }
    }

    pub fn params_and_body(&self) -> Option<&FullCall> {
        match self {
            BoundCall::ParamsAndBody(c) => Some(c),
            _ => None,
        }
    }
}

impl std::fmt::Debug for BoundCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundCall")
            .field("shape", &self.shape())
            .field("verb", &self.verb())
            .field("url", &self.url())
            .finish()
    }
}
