//! Store behaviour under concurrent dispatch
//!
//! Many tasks settle requests against the same slice in arbitrary order;
//! the newest ticket must always win.

use agent_console::models::Voice;
use agent_console::state::{Action, Request, RequestStatus, Store, VoiceAction};
use std::sync::Arc;

fn voice(id: u64) -> Voice {
    Voice {
        id: format!("v{}", id),
        name: format!("Voice {}", id),
        provider: "elevenlabs".to_string(),
        language: None,
        accent: None,
        gender: None,
        preview_url: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_newest_request_wins_under_concurrent_settlement() {
    let store = Arc::new(Store::default());
    let tickets: Vec<_> = (0..32).map(|_| store.next_ticket()).collect();

    for ticket in &tickets {
        store
            .dispatch(Action::Voice(VoiceAction::FetchList(Request::pending(*ticket))))
            .await;
    }

    // Settle in reverse so the newest response lands first
    let mut handles = Vec::new();
    for ticket in tickets.iter().rev().copied() {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .dispatch(Action::Voice(VoiceAction::FetchList(Request::fulfilled(
                    ticket,
                    vec![voice(ticket.seq())],
                ))))
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let newest = tickets.last().copied().unwrap();
    let voices = store.read(|s| s.voices.clone()).await;
    assert_eq!(voices.status, RequestStatus::Succeeded);
    assert_eq!(voices.data, Some(vec![voice(newest.seq())]));
}

#[tokio::test]
async fn test_reset_discards_responses_issued_before_it() {
    let store = Store::default();
    let before = store.next_ticket();
    store
        .dispatch(Action::Voice(VoiceAction::FetchList(Request::pending(before))))
        .await;

    store.reset().await;
    store
        .dispatch(Action::Voice(VoiceAction::FetchList(Request::fulfilled(
            before,
            vec![voice(1)],
        ))))
        .await;

    let voices = store.read(|s| s.voices.clone()).await;
    assert_eq!(voices.status, RequestStatus::Idle);
    assert!(voices.data.is_none());

    let after = store.next_ticket();
    store
        .dispatch(Action::Voice(VoiceAction::FetchList(Request::fulfilled(
            after,
            vec![voice(2)],
        ))))
        .await;
    assert_eq!(
        store.read(|s| s.voices.data.clone()).await,
        Some(vec![voice(2)])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_subscribers_see_reducer_order() {
    use agent_console::state::AgentAction;

    let store = Arc::new(Store::default());
    let mut events = store.subscribe();

    let mut handles = Vec::new();
    for id in 0..64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .dispatch(Action::Agent(AgentAction::SetActiveId(id)))
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut last = None;
    while let Ok(Action::Agent(AgentAction::SetActiveId(id))) = events.try_recv() {
        last = Some(id);
    }
    assert_eq!(last, store.read(|s| s.agents.active_id).await);
}

#[tokio::test]
async fn test_older_request_starting_late_settles_cleanly() {
    let store = Store::default();
    let older = store.next_ticket();
    let newer = store.next_ticket();

    for request in [
        Request::pending(newer),
        Request::fulfilled(newer, vec![voice(2)]),
        Request::pending(older),
        Request::fulfilled(older, vec![voice(1)]),
    ] {
        store
            .dispatch(Action::Voice(VoiceAction::FetchList(request)))
            .await;
    }

    let voices = store.read(|s| s.voices.clone()).await;
    assert_eq!(voices.status, RequestStatus::Succeeded);
    assert_eq!(voices.data, Some(vec![voice(2)]));
}
