//! Window cache expiry through the service

use std::time::Duration;

use crate::common::{TEST_TTL, small_service};

#[test]
fn hit_within_ttl_miss_after() {
    let (service, clock) = small_service();
    service.get_sequence(0, 20).unwrap();
    clock.advance(TEST_TTL - Duration::from_millis(1));
    service.get_sequence(0, 20).unwrap();

    let stats = service.query_stats();
    assert_eq!((stats.cache_hits, stats.cache_misses), (1, 1));

    clock.advance(Duration::from_millis(2));
    service.get_sequence(0, 20).unwrap();
    assert_eq!(service.query_stats().cache_misses, 2);
}

#[test]
fn expired_entries_are_swept() {
    let (service, clock) = small_service();
    service.get_sequence(0, 10).unwrap();
    service.get_sequence(5, 10).unwrap();
    assert_eq!(service.cache_stats().entries, 2);

    clock.advance(TEST_TTL);
    assert_eq!(service.clean_cache(), 2);
    assert_eq!(service.cache_stats().entries, 0);
}

#[test]
fn insertion_sweeps_stale_windows() {
    let (service, clock) = small_service();
    service.get_sequence(0, 10).unwrap();
    clock.advance(TEST_TTL + Duration::from_secs(1));
    service.get_sequence(100, 10).unwrap();

    let stats = service.cache_stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.keys.len(), 1);
}

#[test]
fn expiry_does_not_change_the_digits() {
    let (service, clock) = small_service();
    let before = service.get_sequence(30, 15).unwrap();
    clock.advance(TEST_TTL * 3);
    let after = service.get_sequence(30, 15).unwrap();
    assert_eq!(before, after);
}

#[test]
fn reset_forgets_everything() {
    let (service, _) = small_service();
    service.get_sequence(0, 64).unwrap();
    service.reset();

    let stats = service.query_stats();
    assert_eq!(stats.materialized, 0);
    assert_eq!((stats.cache_hits, stats.cache_misses), (0, 0));
    assert_eq!(service.cache_stats().entries, 0);
    assert_eq!(service.get_sequence(0, 4).unwrap().as_str(), "3141");
}
