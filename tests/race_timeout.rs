//! Race-with-timeout scenarios over simulated fetches.

use std::time::Duration;
use tokio_test::{assert_pending, assert_ready};
use wave_batch::fetch::{fetch_file, FileRecord};
use wave_batch::race::{race_in_background, race_with_sentinel, RaceOutcome};

const TIMEOUT: &str = "timeout";

#[tokio::test(start_paused = true)]
async fn test_fetch_beats_network_timeout() {
    let file = fetch_file("file1.png", Duration::from_millis(1000));
    let outcome = race_with_sentinel(file, Duration::from_millis(4000), TIMEOUT).await;
    assert_eq!(outcome.primary(), Some(FileRecord::placeholder("file1.png")));
}

#[tokio::test(start_paused = true)]
async fn test_loading_state_then_real_result() {
    let file = fetch_file("file1.png", Duration::from_millis(2500));
    let outcome = race_with_sentinel(file, Duration::from_millis(1000), TIMEOUT).await;

    let RaceOutcome::Sentinel { sentinel, pending } = outcome else {
        panic!("timer should fire first");
    };
    assert_eq!(sentinel, TIMEOUT);

    let start = tokio::time::Instant::now();
    let record = pending.await;
    assert_eq!(record.name, "file1.png");
    // Only the remaining 1500ms is waited; the fetch was not restarted.
    assert!(start.elapsed() < Duration::from_millis(1600));
}

#[tokio::test(start_paused = true)]
async fn test_race_is_pending_until_either_side_settles() {
    let file = fetch_file("file1.png", Duration::from_millis(300));
    let mut race = tokio_test::task::spawn(race_with_sentinel(
        file,
        Duration::from_millis(100),
        TIMEOUT,
    ));
    assert_pending!(race.poll());

    tokio::time::advance(Duration::from_millis(100)).await;
    assert!(race.is_woken());
    let outcome = assert_ready!(race.poll());
    assert!(outcome.is_sentinel());
    assert_eq!(format!("{outcome:?}"), r#"Sentinel { sentinel: "timeout", .. }"#);
}

#[tokio::test(start_paused = true)]
async fn test_background_fetch_finishes_after_timeout() {
    let file = fetch_file("file2.ppt", Duration::from_millis(1500));
    let outcome = race_in_background(file, Duration::from_millis(1000), TIMEOUT)
        .await
        .unwrap();
    assert!(outcome.is_sentinel());

    let pending = outcome.into_pending().unwrap();
    let record = pending.await.unwrap();
    assert_eq!(record, FileRecord::placeholder("file2.ppt"));
}
