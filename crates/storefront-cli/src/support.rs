//! `health`, `newsletter` and `contact` command handlers.

use anyhow::bail;
use storefront_client::{resources, ContactMessage};

use crate::Context;

/// Print backend status. An unreachable API is reported, not treated as an
/// error.
///
/// # Errors
///
/// Does not fail; the signature matches the other handlers.
pub(crate) async fn run_health(ctx: &Context) -> anyhow::Result<()> {
    let resource = resources::health(ctx.client.clone());
    resource.activate(());
    let state = resource.settled().await;

    if let Some(err) = &state.error {
        eprintln!("warning: {err}");
    }
    if let Some(health) = state.data {
        println!("api:      {}", ctx.client.base_url());
        println!("status:   {}", health.status);
        println!("database: {}", health.database);
        if !health.is_connected() {
            println!("backend unavailable; catalog commands use demo data");
        }
    }
    Ok(())
}

/// Subscribe an email address.
///
/// # Errors
///
/// Returns an error for an obviously malformed address, a failed request, or
/// a response with `success: false`.
pub(crate) async fn run_newsletter(ctx: &Context, email: &str) -> anyhow::Result<()> {
    if !looks_like_email(email) {
        bail!("'{email}' is not a valid email address");
    }
    let ack = ctx.client.subscribe_newsletter(email).await?;
    if !ack.success {
        bail!("subscription was not accepted");
    }
    println!("subscribed {email}");
    Ok(())
}

/// Send a contact form message.
///
/// # Errors
///
/// Returns an error for empty fields, a failed request, or a response with
/// `success: false`.
pub(crate) async fn run_contact(ctx: &Context, message: &ContactMessage) -> anyhow::Result<()> {
    if !looks_like_email(&message.email) {
        bail!("'{}' is not a valid email address", message.email);
    }
    if message.message.trim().is_empty() {
        bail!("message must not be empty");
    }
    let ack = ctx.client.send_contact_message(message).await?;
    if !ack.success {
        bail!("message was not accepted");
    }
    println!("message sent");
    Ok(())
}

/// Same check the form inputs apply: something on both sides of a single `@`,
/// with a dot in the domain.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check() {
        assert!(looks_like_email("kim@example.com"));
        assert!(looks_like_email("kim.weber@shop.example.de"));
        assert!(!looks_like_email("kim"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("kim@example"));
        assert!(!looks_like_email("kim@@example.com"));
    }
}
