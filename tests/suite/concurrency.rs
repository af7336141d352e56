//! Shared service under concurrent callers

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pidigits_engine::{CancellationToken, EngineSettings, PiService, QueryError};

use crate::common::{PI_50, small_service};

#[test]
fn threads_see_the_same_digits() {
    let (service, _) = small_service();
    let service = Arc::new(service);
    let windows = [(0, 50), (10, 30), (25, 25), (0, 12), (40, 10), (1, 49)];

    let handles: Vec<_> = windows
        .into_iter()
        .map(|(start, length)| {
            let service = Arc::clone(&service);
            thread::spawn(move || (start, length, service.get_sequence(start, length)))
        })
        .collect();

    for handle in handles {
        let (start, length, digits) = handle.join().unwrap();
        let (s, l) = (start as usize, length as usize);
        assert_eq!(digits.unwrap().as_str(), &PI_50[s..s + l]);
    }
    assert!(service.query_stats().materialized >= 50);
}

#[test]
fn cancelled_request_leaves_the_service_usable() {
    let (service, _) = small_service();
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(
        service.get_sequence_with(0, 300, &token),
        Err(QueryError::Cancelled)
    );
    assert_eq!(service.get_sequence(0, 5).unwrap().as_str(), "31415");
}

#[test]
fn exhausted_budget_reports_progress() {
    let settings = EngineSettings::default().with_request_timeout(Some(Duration::ZERO));
    let service = PiService::new(settings);
    let err = service.get_sequence(0, 100).unwrap_err();
    assert!(
        matches!(err, QueryError::ResourceExhaustion { produced: 0, .. }),
        "{err:?}"
    );
    assert!(!err.is_caller_error());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_callers_interleave() {
    let (service, _) = small_service();
    let service = Arc::new(service);

    let tasks: Vec<_> = [(0, 400), (100, 200), (350, 50)]
        .into_iter()
        .map(|(start, length)| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let token = CancellationToken::new();
                service.get_sequence_async(start, length, &token).await
            })
        })
        .collect();

    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap().unwrap());
    }
    assert_eq!(&results[0].as_str()[100..300], results[1].as_str());
    assert_eq!(&results[0].as_str()[350..400], results[2].as_str());
}
