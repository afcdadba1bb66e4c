//! `search` command handlers.

use std::sync::Arc;
use std::time::Duration;

use storefront_client::{DebouncedSearch, SearchState};
use storefront_core::fixtures;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Context;

fn debounced_search(ctx: &Context) -> DebouncedSearch {
    DebouncedSearch::new(
        Arc::clone(&ctx.catalog),
        ctx.fallback(fixtures::search_results).unwrap_or_default(),
        ctx.search_delay,
    )
}

fn print_results(state: &SearchState) {
    if let Some(err) = &state.error {
        eprintln!("warning: {err}; showing offline results");
    }
    if state.results.is_empty() {
        println!("no results for \"{}\"", state.results_for);
        return;
    }
    println!(
        "{} results for \"{}\"",
        state.results.len(),
        state.results_for
    );
    for product in &state.results {
        println!(
            "  {:<6}{:<28}{:>10}",
            product.id,
            product.name,
            crate::products::fmt_price(product.price)
        );
    }
}

/// Run one search immediately.
///
/// # Errors
///
/// Never fails on a backend error; those fall back to offline results.
pub(crate) async fn run_search(ctx: &Context, query: &str) -> anyhow::Result<()> {
    let search = debounced_search(ctx);
    let state = search.search(query).await;
    print_results(&state);
    Ok(())
}

/// Feed stdin lines to the debouncer as if they were keystrokes and print
/// every settled result set.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub(crate) async fn run_search_interactive(ctx: &Context) -> anyhow::Result<()> {
    let search = debounced_search(ctx);
    let mut updates = search.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut was_loading = false;
    let mut printed: Option<String> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(query) => search.set_query(&query),
                    None => break,
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                // Only completed searches are printed, not bare query edits.
                if was_loading && !state.loading {
                    print_results(&state);
                    printed = Some(state.results_for.clone());
                }
                was_loading = state.loading;
            }
        }
    }

    // Let the last pending query run before exiting.
    let last = search.state().query;
    if !last.trim().is_empty() && printed.as_deref() != Some(last.as_str()) {
        tokio::time::sleep(search.delay() + Duration::from_millis(50)).await;
        let settled = updates.wait_for(|s| !s.loading).await?.clone();
        print_results(&settled);
    }
    Ok(())
}
