//! Tests for the single-flight request manager.

use super::*;
use crate::testing::ScriptedTransport;

fn manager(transport: &Arc<ScriptedTransport>) -> RequestManager {
    RequestManager::new(transport.clone(), Duration::from_secs(45))
}

fn ask(text: &str) -> AskRequest {
    AskRequest::new(text, &[])
}

#[test]
fn tokens_increase_and_only_latest_is_active() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut requests = manager(&transport);

    let first = requests.begin();
    let second = requests.begin();

    assert!(second.token() > first.token());
    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    assert!(!requests.is_active(first.token()));
    assert!(requests.is_active(second.token()));
}

#[test]
fn finish_rejects_stale_token() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut requests = manager(&transport);

    let first = requests.begin();
    let second = requests.begin();

    assert!(!requests.finish(first.token()));
    assert!(requests.finish(second.token()));
    assert_eq!(requests.active(), None);
    assert!(!requests.finish(second.token()));
}

#[test]
fn cancel_clears_active_ticket() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut requests = manager(&transport);
    assert_eq!(requests.cancel(), None);

    let ticket = requests.begin();
    assert_eq!(requests.cancel(), Some(ticket.token()));
    assert!(ticket.is_cancelled());
    assert_eq!(requests.active(), None);
}

#[test]
fn token_display() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut requests = manager(&transport);
    let ticket = requests.begin();
    assert_eq!(ticket.token().to_string(), "req-1");
    assert_eq!(ticket.token().value(), 1);
}

#[test]
fn outcome_from_transport_result() {
    assert_eq!(
        RequestOutcome::from(Ok("hi".to_string())),
        RequestOutcome::Success("hi".into())
    );
    assert_eq!(
        RequestOutcome::from(Err(TransportError::Http {
            status: 502,
            detail: None
        })),
        RequestOutcome::HttpError {
            status: 502,
            detail: None
        }
    );
    assert_eq!(
        RequestOutcome::from(Err(TransportError::Network("empty response".into()))),
        RequestOutcome::NetworkError("empty response".into())
    );
}

#[tokio::test]
async fn issue_returns_transport_reply() {
    let transport = Arc::new(ScriptedTransport::replying([Ok("Result: 3".to_string())]));
    let mut requests = manager(&transport);
    let ticket = requests.begin();

    let outcome = requests.issue(&ticket, ask("failed jobs?")).await;
    assert_eq!(outcome, RequestOutcome::Success("Result: 3".into()));
    assert_eq!(transport.request(0).message, "failed jobs?");
}

#[tokio::test]
async fn issue_classifies_http_error() {
    let transport = Arc::new(ScriptedTransport::replying([Err(TransportError::Http {
        status: 429,
        detail: Some("Too many requests.".into()),
    })]));
    let mut requests = manager(&transport);
    let ticket = requests.begin();

    let outcome = requests.issue(&ticket, ask("q")).await;
    assert_eq!(
        outcome,
        RequestOutcome::HttpError {
            status: 429,
            detail: Some("Too many requests.".into())
        }
    );
}

#[tokio::test(start_paused = true)]
async fn issue_times_out_and_drops_the_call() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut requests = manager(&transport);
    let ticket = requests.begin();

    let started = tokio::time::Instant::now();
    let outcome = requests.issue(&ticket, ask("slow")).await;

    assert_eq!(outcome, RequestOutcome::Timeout);
    assert!(started.elapsed() >= Duration::from_secs(45));
    assert!(ticket.is_cancelled());
    assert!(!transport.resolve(0, Ok("too late".into())));
}

#[tokio::test]
async fn superseding_cancels_pending_issue() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut requests = manager(&transport);
    let first = requests.begin();
    let pending = tokio::spawn(requests.issue(&first, ask("one")));
    transport.wait_for_calls(1).await;

    let _second = requests.begin();

    assert_eq!(pending.await.unwrap(), RequestOutcome::Cancelled);
    assert!(!transport.resolve(0, Ok("stale".into())));
}

#[tokio::test]
async fn cancelled_ticket_never_reaches_transport() {
    let transport = Arc::new(ScriptedTransport::replying([Ok("unused".to_string())]));
    let mut requests = manager(&transport);
    let ticket = requests.begin();
    requests.cancel();

    let outcome = requests.issue(&ticket, ask("q")).await;
    assert_eq!(outcome, RequestOutcome::Cancelled);
    assert_eq!(transport.call_count(), 0);
}
