use std::time::Duration;

use glanz_types::{AppEvent, FollowUp};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::scheduler::FollowUpScheduler;

#[tokio::test]
async fn follow_up_arrives_after_delay_with_its_generation() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let scheduler = FollowUpScheduler::new(tx, CancellationToken::new());

    scheduler.schedule(Duration::from_millis(20), FollowUp::Speak("Haus".into()));

    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(AppEvent::FollowUp {
            follow_up,
            generation,
        })) => {
            assert_eq!(follow_up, FollowUp::Speak("Haus".into()));
            assert!(scheduler.is_current(generation));
        }
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - follow-up never arrived!"),
    }
}

#[tokio::test]
async fn reset_cancels_pending_follow_ups() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let mut scheduler = FollowUpScheduler::new(tx, CancellationToken::new());

    scheduler.schedule(Duration::from_millis(30), FollowUp::AdvanceAfterDictation);
    scheduler.reset();

    let result = timeout(Duration::from_millis(150), rx.recv()).await;
    assert!(result.is_err(), "cancelled follow-up was delivered");
    assert_eq!(scheduler.generation(), 1);
}

#[tokio::test]
async fn only_follow_ups_after_reset_survive() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let mut scheduler = FollowUpScheduler::new(tx, CancellationToken::new());

    scheduler.schedule(Duration::from_millis(30), FollowUp::Speak("alt".into()));
    scheduler.reset();
    scheduler.schedule(Duration::from_millis(30), FollowUp::Speak("neu".into()));

    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(AppEvent::FollowUp { follow_up, .. })) => {
            assert_eq!(follow_up, FollowUp::Speak("neu".into()));
        }
        _ => panic!("Expected the rescheduled follow-up"),
    }
    assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
}

#[tokio::test]
async fn stale_generation_is_recognized() {
    let (tx, _rx) = kanal::unbounded_async::<AppEvent>();
    let mut scheduler = FollowUpScheduler::new(tx, CancellationToken::new());

    let before = scheduler.generation();
    scheduler.reset();

    assert!(!scheduler.is_current(before));
    assert!(scheduler.is_current(scheduler.generation()));
}

#[tokio::test]
async fn parent_cancellation_stops_everything() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let parent = CancellationToken::new();
    let scheduler = FollowUpScheduler::new(tx, parent.clone());

    scheduler.schedule(Duration::from_millis(30), FollowUp::Speak("Haus".into()));
    parent.cancel();

    assert!(timeout(Duration::from_millis(150), rx.recv()).await.is_err());
}
