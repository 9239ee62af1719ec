//! Root of the route tree.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

use crate::dispatch::{Dispatcher, RequestConfig, ResponseEnvelope};
use crate::error::RequestResult;
use crate::routing::node::{child, RouteNode};
use crate::routing::spec::Verb;
use crate::routing::url::Params;

static GLOBAL: OnceLock<RouteTree> = OnceLock::new();

/// Entry point for path-chained API calls.
///
/// ```no_run
/// # use api_tree::{RouteTree, RequestConfig};
/// # async fn demo(api: &RouteTree) -> api_tree::RequestResult<()> {
/// let info = api.route("user").route("info").route("getP");
/// if let Some(call) = info.call().params_only() {
///     let res: api_tree::ResponseEnvelope = call.call(Default::default(), RequestConfig::new()).await?;
///     println!("{}", res.data);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RouteTree {
    dispatcher: Arc<Dispatcher>,
    children: DashMap<String, Arc<RouteNode>>,
}

impl RouteTree {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            children: DashMap::new(),
        }
    }

    /// Install the process-wide tree. Fails with the given tree if one is
    /// already installed.
    pub fn install(tree: RouteTree) -> Result<(), RouteTree> {
        GLOBAL.set(tree)
    }

    /// The process-wide tree, if installed.
    pub fn global() -> Option<&'static RouteTree> {
        GLOBAL.get()
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Top-level node for `segment`, created on first access.
    pub fn route(&self, segment: &str) -> Arc<RouteNode> {
        child(&self.children, "", segment, &self.dispatcher)
    }

    /// Walk a slash-separated path, e.g. `user/info/get`.
    /// Empty segments are skipped; returns `None` if nothing remains.
    pub fn path(&self, path: &str) -> Option<Arc<RouteNode>> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = self.route(segments.next()?);
        Some(segments.fold(first, |node, segment| node.route(segment)))
    }

    /// Direct call with an explicit verb, bypassing path inference.
    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Params,
        body: Option<Value>,
        verb: Verb,
        config: RequestConfig,
    ) -> RequestResult<ResponseEnvelope<T>> {
        self.dispatcher
            .execute(url, &params, body.as_ref(), verb, &config)
            .await
    }
}

impl std::fmt::Debug for RouteTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTree")
            .field("dispatcher", &self.dispatcher)
            .field("children", &self.children.len())
            .finish()
    }
}
