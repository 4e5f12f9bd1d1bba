//! Functional tests for path resolution and conversion.
//!
//! These tests exercise the public conversion surface end to end:
//! - from_to applies the shortest chain of registered converters.
//! - Identical versions never touch the graph or any converter.
//! - Paths are cached per pair and rebuilt after registration.
//! - Re-registering a pair replaces both directions.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use vers::prelude::*;
use vers_test_utils::{init_tracing, sample_vers, Recorder};

/// Tenet: converting to the same version is the identity and invokes nothing.
#[tokio::test]
async fn identity_conversion_invokes_no_converter() {
    init_tracing();
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    for v in [1, 3, 4, 42] {
        let obj = json!({"version": v, "payload": [1, 2, 3]});
        let out = vers.from_to(v, v, obj.clone()).await.unwrap();
        assert_eq!(out, obj);
    }

    assert!(recorder.calls().is_empty());
    assert_eq!(vers.cache_stats().misses, 0);
}

/// Tenet: upgrades take the fewest registered hops.
#[tokio::test]
async fn upgrade_uses_shortest_chain() {
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    let out = vers.from_to(1, 4, json!({"version": 1})).await.unwrap();

    assert_eq!(recorder.take(), vec!["1->3", "3->4"]);
    assert_eq!(out["version"], 4);
}

/// Tenet: downgrades use back converters along the shortest chain.
#[tokio::test]
async fn downgrade_uses_shortest_chain() {
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    vers.from_to(4, 1, json!({"version": 4})).await.unwrap();

    assert_eq!(recorder.take(), vec!["4->3", "3->1"]);
}

/// Tenet: a route may step down to reach a one-way branch.
#[tokio::test]
async fn route_steps_down_to_reach_one_way_edge() {
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    let out = vers.from_to(3, 5, json!({"version": 3})).await.unwrap();

    assert_eq!(recorder.take(), vec!["3->1", "1->5"]);
    assert_eq!(out["version"], 5);
}

/// Tenet: one-way converters cannot be walked backwards.
#[tokio::test]
async fn one_way_edge_has_no_return_path() {
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    let err = vers.from_to(5, 1, json!({})).await.unwrap_err();
    assert!(err.is_no_path());
    assert!(recorder.calls().is_empty());
}

/// Tenet: an empty graph reports NoPathFound rather than returning the input.
#[tokio::test]
async fn empty_graph_fails_with_no_path() {
    let vers: Vers<Value> = Vers::new();

    let err = vers.from_to(1, 2, json!({})).await.unwrap_err();
    match err {
        VersError::NoPathFound { from, to } => {
            assert_eq!(from, Version::from(1));
            assert_eq!(to, Version::from(2));
        }
        other => panic!("expected NoPathFound, got {other:?}"),
    }
}

/// Tenet: among equally short routes, the earliest registered edges win.
#[tokio::test]
async fn equal_routes_prefer_earliest_registration() {
    let recorder = Recorder::new();
    let vers: Vers<Value> = Vers::new();
    vers.add_converter(1, 2, recorder.hop(1, 2));
    vers.add_converter(1, 3, recorder.hop(1, 3));
    vers.add_converter(2, 4, recorder.hop(2, 4));
    vers.add_converter(3, 4, recorder.hop(3, 4));

    vers.from_to(1, 4, json!({})).await.unwrap();
    assert_eq!(recorder.take(), vec!["1->2", "2->4"]);

    vers.add_converter(1, 2, recorder.labelled(1, 2, " (new)"));
    vers.from_to(1, 4, json!({})).await.unwrap();
    assert_eq!(recorder.take(), vec!["1->2 (new)", "2->4"]);
}

/// Tenet: a resolved path is served from the cache on the next request.
#[tokio::test]
async fn repeated_conversion_hits_cache() {
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    vers.from_to(1, 4, json!({})).await.unwrap();
    vers.from_to(1, 4, json!({})).await.unwrap();

    let stats = vers.cache_stats();
    assert_eq!((stats.misses, stats.hits), (1, 1));
    assert_eq!(recorder.take(), vec!["1->3", "3->4", "1->3", "3->4"]);
}

/// Tenet: registering a shortcut is visible to the very next conversion.
#[tokio::test]
async fn new_shortcut_replaces_cached_route() {
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    vers.from_to(2, 4, json!({})).await.unwrap();
    assert_eq!(recorder.take(), vec!["2->3", "3->4"]);

    vers.add_converter(2, 4, recorder.hop(2, 4));
    vers.from_to(2, 4, json!({})).await.unwrap();
    assert_eq!(recorder.take(), vec!["2->4"]);
}

/// Tenet: re-registering a pair replaces both directions and nothing else.
#[tokio::test]
async fn re_registration_overwrites_both_directions() {
    let recorder = Recorder::new();
    let vers: Vers<Value> = Vers::new();

    vers.add_converters(
        "cow",
        "pig",
        recorder.labelled("cow", "pig", " (old)"),
        recorder.labelled("pig", "cow", " (old)"),
    );
    vers.add_converters("cow", "pig", recorder.hop("cow", "pig"), recorder.hop("pig", "cow"));

    let pig = vers.from_to("cow", "pig", json!({"version": "cow"})).await.unwrap();
    let cow = vers.from_to("pig", "cow", pig).await.unwrap();

    assert_eq!(cow["version"], "cow");
    assert_eq!(recorder.take(), vec!["cow->pig", "pig->cow"]);
    assert_eq!(vers.converter_count(), 2);
}

/// Tenet: converters may replace the object instead of mutating it.
#[tokio::test]
async fn replacing_converters_feed_the_next_hop() {
    let vers: Vers<Value> = Vers::new();
    vers.add_converter(1, 2, from_fn(|obj: &mut Value| {
        Some(json!({"version": 2, "name": obj["first"].clone()}))
    }));
    vers.add_converter(2, 3, from_fn(|obj: &mut Value| {
        obj["version"] = json!(3);
        obj["name"] = json!(format!("Dr. {}", obj["name"].as_str().unwrap_or_default()));
        None
    }));

    let out = vers.from_to(1, 3, json!({"first": "Who"})).await.unwrap();

    assert_eq!(out, json!({"version": 3, "name": "Dr. Who"}));
}

/// Tenet: a failing converter fails the whole conversion and later
/// converters never run.
#[tokio::test]
async fn converter_failure_aborts_remaining_hops() {
    let recorder = Recorder::new();
    let vers: Vers<Value> = Vers::new();
    vers.add_converter(1, 2, recorder.hop(1, 2));
    vers.add_converter(
        2,
        3,
        try_from_fn(|obj: &mut Value| {
            if obj.get("blocked").is_some() {
                Err("blocked documents cannot reach v3")
            } else {
                Ok(None)
            }
        }),
    );
    vers.add_converter(3, 4, recorder.hop(3, 4));

    let err = vers
        .from_to(1, 4, json!({"blocked": true}))
        .await
        .unwrap_err();

    assert!(err.is_converter_failure());
    assert!(err.to_string().contains("2 -> 3"));
    assert_eq!(recorder.take(), vec!["1->2"]);
}

/// Tenet: the resolved path can be inspected without converting anything.
#[test]
fn path_exposes_hops_in_execution_order() {
    let recorder = Recorder::new();
    let vers = sample_vers(&recorder);

    let path = vers.path(4, 2).unwrap();
    let hops: Vec<String> = path.iter().map(|h| format!("{h:?}")).collect();

    assert_eq!(hops, vec!["4 -> 3", "3 -> 2"]);
    assert!(recorder.calls().is_empty());
}
