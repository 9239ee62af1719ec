//! Route tree memoization and bound-call dispatch.

use serde_json::{json, Value};
use std::sync::Arc;

use api_tree::config::ClientConfig;
use api_tree::routing::Params;
use api_tree::{BoundCall, CallShape, RequestConfig, ResponseEnvelope, RouteTree, Verb};

mod common;
use common::{envelope, Harness};

fn harness() -> Harness {
    Harness::new(
        ClientConfig::with_base_url("http://api.test"),
        vec![envelope(0, "ok", json!({"done": true}))],
    )
}

#[test]
fn test_same_path_returns_same_node() {
    let h = harness();
    let api = h.tree();

    let first = api.route("user").route("info").route("get");
    let second = api.route("user").route("info").route("get");

    assert!(Arc::ptr_eq(&first, &second));
    assert!(std::ptr::eq(first.call(), second.call()));
    assert_eq!(api.route("user").child_count(), 1);
}

#[test]
fn test_path_walk_matches_chaining() {
    let h = harness();
    let api = h.tree();

    let chained = api.route("user").route("info").route("postP");
    let walked = api.path("/user//info/postP").unwrap();
    assert!(Arc::ptr_eq(&chained, &walked));

    assert!(api.path("").is_none());
    assert!(api.path("///").is_none());
}

#[test]
fn test_node_paths_and_specs() {
    let h = harness();
    let api = h.tree();

    let user = api.route("user");
    assert_eq!(user.path(), "/user");
    assert_eq!(user.spec().url, "/user");
    assert_eq!(user.spec().verb, Verb::Post);

    let put = user.route("info").route("putB");
    assert_eq!(put.path(), "/user/info/putB");
    assert_eq!(put.spec().url, "/user/info");
    assert_eq!(put.spec().verb, Verb::Put);
    assert_eq!(put.call().shape(), CallShape::BodyOnly);
    assert!(put.call().body_only().is_some());
    assert!(put.call().params_only().is_none());

    let del = user.route("delZ");
    assert_eq!(del.call().verb(), Verb::Delete);
    assert_eq!(del.call().url(), "/user");
    assert!(matches!(del.call(), BoundCall::NoArgs(_)));
}

#[test]
fn test_verb_node_is_still_a_namespace() {
    let h = harness();
    let api = h.tree();

    // `get` is an endpoint and can still hold children.
    let deeper = api.route("get").route("list").route("getP");
    assert_eq!(deeper.path(), "/get/list/getP");
    assert_eq!(deeper.spec().url, "/get/list");
    assert_eq!(api.route("get").child_count(), 1);
}

#[tokio::test]
async fn test_concurrent_first_access_yields_one_node() {
    let h = harness();
    let api = Arc::new(h.tree());

    let mut handles = Vec::new();
    for _ in 0..16 {
        let api = api.clone();
        handles.push(tokio::spawn(async move { api.route("shop").route("cart") }));
    }

    let mut nodes = Vec::new();
    for handle in handles {
        nodes.push(handle.await.unwrap());
    }
    assert!(nodes.iter().all(|n| Arc::ptr_eq(n, &nodes[0])));
    assert_eq!(api.route("shop").child_count(), 1);
}

#[tokio::test]
async fn test_params_only_call() {
    let h = harness();
    let api = h.tree();

    let node = api.route("user").route("info").route("getP");
    let call = node.call().params_only().unwrap();

    let mut params = Params::new();
    params.insert("id".into(), json!(9));
    let res: ResponseEnvelope = call.call(params, RequestConfig::new()).await.unwrap();
    assert_eq!(res.data, json!({"done": true}));

    let request = &h.transport.requests()[0];
    assert_eq!(request.url, "http://api.test/user/info?id=9");
    assert_eq!(request.method, Verb::Get);
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_body_only_call() {
    let h = harness();
    let api = h.tree();

    let node = api.route("order").route("postB");
    let call = node.call().body_only().unwrap();
    call.call::<Value>(Some(json!({"sku": "A1"})), RequestConfig::new())
        .await
        .unwrap();

    let request = &h.transport.requests()[0];
    assert_eq!(request.url, "http://api.test/order");
    assert_eq!(request.method, Verb::Post);
    assert_eq!(request.body, Some(json!({"sku": "A1"})));
}

#[tokio::test]
async fn test_no_args_call() {
    let h = harness();
    let api = h.tree();

    let node = api.route("session").route("delZ");
    node.call()
        .no_args()
        .unwrap()
        .call::<Value>(RequestConfig::new())
        .await
        .unwrap();

    let request = &h.transport.requests()[0];
    assert_eq!(request.url, "http://api.test/session");
    assert_eq!(request.method, Verb::Delete);
}

#[tokio::test]
async fn test_resource_node_posts_params_and_body() {
    let h = harness();
    let api = h.tree();

    let node = api.route("feedback");
    let mut params = Params::new();
    params.insert("v".into(), json!(2));
    node.call()
        .params_and_body()
        .unwrap()
        .call::<Value>(params, Some(json!({"text": "hi"})), RequestConfig::new())
        .await
        .unwrap();

    let request = &h.transport.requests()[0];
    assert_eq!(request.url, "http://api.test/feedback?v=2");
    assert_eq!(request.method, Verb::Post);
    assert_eq!(request.body, Some(json!({"text": "hi"})));
}

#[tokio::test]
async fn test_direct_request_bypasses_inference() {
    let h = harness();
    let api = h.tree();

    api.request::<Value>("/user/info/get", Params::new(), None, Verb::Put, RequestConfig::new())
        .await
        .unwrap();

    let request = &h.transport.requests()[0];
    assert_eq!(request.url, "http://api.test/user/info/get");
    assert_eq!(request.method, Verb::Put);
}

#[test]
fn test_global_install_once() {
    let h = harness();
    assert!(RouteTree::install(h.tree()).is_ok());
    assert!(RouteTree::install(h.tree()).is_err());

    let global = RouteTree::global().unwrap();
    let a = global.route("user").route("get");
    let b = RouteTree::global().unwrap().route("user").route("get");
    assert!(Arc::ptr_eq(&a, &b));
}
