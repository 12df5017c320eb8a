use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::{prelude::*, EnvFilter};

use satie::prelude::*;

fn init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_target(false))
        .with(EnvFilter::from_default_env())
        .try_init()
        .unwrap_or(());
}

/// A lookup against a local cache, resolving with an absent value on a miss
fn cache_lookup(key: &str) -> Task<Maybe<String>, String> {
    let cache: HashMap<&str, &str> = HashMap::from([("greeting", "hola")]);
    let value = Maybe::from(cache.get(key).map(|value| value.to_string()));

    Task::of(value)
}

/// A slower remote lookup, rejecting for unknown keys
fn remote_lookup(key: &'static str) -> Task<Maybe<String>, String> {
    Task::from_io(move || async move {
        sleep(Duration::from_millis(10)).await;
        match key {
            "greeting" => Ok(Just("hello".to_string())),
            "farewell" => Ok(Just("bye".to_string())),
            _ => Err(format!("unknown key: {key}")),
        }
    })
}

#[tokio::test]
async fn it_serves_cached_values_without_reaching_the_remote() {
    init();

    let task = double_alt(cache_lookup("greeting"), remote_lookup("greeting"))
        .map(|value| value.get_or_else("n/a".to_string()));

    assert_eq!(task.run().await, Some(Ok("hola".to_string())));
}

#[tokio::test]
async fn it_falls_back_to_the_remote_on_a_cache_miss() {
    init();

    let task = double_alt(cache_lookup("farewell"), remote_lookup("farewell"))
        .map(|value| value.get_or_else("n/a".to_string()));

    assert_eq!(task.run().await, Some(Ok("bye".to_string())));
}

#[tokio::test]
async fn it_goes_silent_when_the_value_is_absent_everywhere() {
    init();

    // Collapsing the absent value with maybe_to_task leaves downstream
    // steps unreached instead of handing them a synthetic default
    let task = cache_lookup("farewell")
        .chain(maybe_to_task)
        .map(|value| format!("cached: {value}"));

    assert_eq!(task.run().await, None);
}

#[tokio::test]
async fn it_surfaces_remote_failures_to_the_caller() {
    init();

    let task = remote_lookup("missing").chain(maybe_to_task);

    assert_eq!(
        task.run().await,
        Some(Err("unknown key: missing".to_string()))
    );
}

#[tokio::test]
async fn it_reruns_the_whole_pipeline_on_every_fork() {
    init();

    let task = double_alt(cache_lookup("greeting"), remote_lookup("greeting"))
        .map(|value| value.get_or_else("n/a".to_string()));

    // Cold semantics survive composition: each run is an independent fork
    assert_eq!(task.run().await, Some(Ok("hola".to_string())));
    assert_eq!(task.run().await, Some(Ok("hola".to_string())));
}
