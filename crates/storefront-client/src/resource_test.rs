use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::time::sleep;

use super::*;

/// Key `n` resolves to `"value-n"` after `n * 10` ms.
fn slow_by_key() -> Producer<u64, String> {
    producer(|key: u64| async move {
        sleep(Duration::from_millis(key * 10)).await;
        Ok(format!("value-{key}"))
    })
}

fn failing() -> Producer<u64, String> {
    producer(|key: u64| async move { Err(ApiError::NotFound(format!("item {key}"))) })
}

#[tokio::test(start_paused = true)]
async fn activation_loads_data() {
    let resource = Resource::new(slow_by_key(), None);
    assert_eq!(resource.state(), ResourceState::default());

    resource.activate(2);
    assert!(resource.state().loading);

    let state = resource.settled().await;
    assert_eq!(state.data.as_deref(), Some("value-2"));
    assert!(state.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn key_change_drops_the_superseded_result() {
    let resource = Resource::new(slow_by_key(), None);

    // Key 10 finishes after key 1; without the guard it would win.
    resource.activate(10);
    resource.activate(1);
    sleep(Duration::from_millis(500)).await;

    let state = resource.state();
    assert_eq!(state.data.as_deref(), Some("value-1"));
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn teardown_drops_in_flight_result() {
    let resource = Resource::new(slow_by_key(), None);
    resource.activate(5);
    resource.teardown();
    sleep(Duration::from_millis(500)).await;

    let state = resource.state();
    assert!(state.data.is_none());
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn reactivating_after_teardown_fetches_again() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let resource = Resource::new(
        producer(move |key: u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(key) }
        }),
        None,
    );

    resource.activate(3);
    resource.settled().await;
    resource.teardown();
    resource.activate(3);
    let state = resource.settled().await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(state.data, Some(3));
}

#[tokio::test(start_paused = true)]
async fn same_key_does_not_refetch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let resource = Resource::new(
        producer(move |key: u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(key) }
        }),
        None,
    );

    resource.activate(7);
    resource.activate(7);
    resource.settled().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn failure_substitutes_fallback_when_empty() {
    let resource = Resource::new(failing(), Some("fallback".to_string()));
    resource.activate(4);
    let state = resource.settled().await;

    assert_eq!(state.data.as_deref(), Some("fallback"));
    assert_eq!(
        state.error.as_deref(),
        Some("request failed: item 4 not found")
    );
}

#[tokio::test(start_paused = true)]
async fn failure_without_fallback_leaves_data_empty() {
    let resource = Resource::new(failing(), None);
    resource.activate(1);
    let state = resource.settled().await;

    assert!(state.data.is_none());
    assert!(state.error.is_some());
}

#[tokio::test(start_paused = true)]
async fn fallback_fn_sees_the_failed_key() {
    let resource = Resource::with_fallback_fn(failing(), |key: &u64| format!("placeholder-{key}"));
    resource.activate(9);
    let state = resource.settled().await;
    assert_eq!(state.data.as_deref(), Some("placeholder-9"));
}

#[tokio::test(start_paused = true)]
async fn refetch_keeps_data_and_failure_keeps_it_too() {
    let fail = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fail);
    let resource = Resource::new(
        producer(move |key: u64| {
            let fail = flag.load(Ordering::SeqCst);
            async move {
                sleep(Duration::from_millis(50)).await;
                if fail {
                    Err(ApiError::NotFound("backend".to_string()))
                } else {
                    Ok(format!("value-{key}"))
                }
            }
        }),
        Some("fallback".to_string()),
    );

    resource.activate(1);
    resource.settled().await;

    fail.store(true, Ordering::SeqCst);
    resource.refetch();
    let in_flight = resource.state();
    assert!(in_flight.loading);
    assert_eq!(in_flight.data.as_deref(), Some("value-1"));

    let state = resource.settled().await;
    assert_eq!(
        state.data.as_deref(),
        Some("value-1"),
        "fallback must not replace held data"
    );
    assert!(state.error.is_some());
}

#[tokio::test(start_paused = true)]
async fn overlapping_refetches_stay_loading_until_the_last_completes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    // The first refetch answers after 100 ms, the second after 300 ms.
    let resource = Resource::new(
        producer(move |_: u64| {
            let call = counter.fetch_add(1, Ordering::SeqCst) as u64;
            async move {
                sleep(Duration::from_millis(match call {
                    1 => 100,
                    2 => 300,
                    _ => 0,
                }))
                .await;
                Ok(call)
            }
        }),
        None,
    );

    resource.activate(1);
    resource.settled().await;

    resource.refetch();
    resource.refetch();
    sleep(Duration::from_millis(150)).await;

    let partial = resource.state();
    assert_eq!(partial.data, Some(1));
    assert!(partial.loading, "second refetch is still in flight");

    let state = resource.settled().await;
    assert_eq!(state.data, Some(2));
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn refetch_before_activation_is_a_no_op() {
    let resource = Resource::new(slow_by_key(), None);
    resource.refetch();
    assert!(!resource.state().loading);
}

#[tokio::test(start_paused = true)]
async fn subscribers_observe_completion() {
    let resource = Resource::new(slow_by_key(), None);
    let mut rx = resource.subscribe();
    resource.activate(3);

    let state = rx
        .wait_for(|s| s.data.is_some())
        .await
        .expect("sender is alive")
        .clone();
    assert_eq!(state.data.as_deref(), Some("value-3"));
}
