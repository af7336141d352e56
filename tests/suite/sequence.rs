//! Digit window queries

use pidigits_core::Spigot;
use pidigits_engine::{CancellationToken, PiService, QueryError, format_with_decimal_point};

use crate::common::{PI_50, small_service};

#[test]
fn first_twelve_digits() {
    let (service, _) = small_service();
    let digits = service.get_sequence(0, 12).unwrap();
    insta::assert_snapshot!(digits.as_str(), @"314159265358");
}

#[test]
fn presentation_helper_adds_the_point() {
    let (service, _) = small_service();
    let digits = service.get_sequence(0, 6).unwrap();
    assert_eq!(format_with_decimal_point(0, &digits), "3.14159");

    let later = service.get_sequence(1, 5).unwrap();
    assert_eq!(format_with_decimal_point(1, &later), "14159");
}

#[test]
fn windows_agree_with_the_sequential_generator() {
    let mut spigot = Spigot::new();
    let expected: String = (0..300)
        .map(|_| spigot.next_digit().unwrap().as_char())
        .collect();

    let (service, _) = small_service();
    for (start, length) in [(0, 300), (7, 1), (250, 50), (99, 101), (0, 1)] {
        let digits = service.get_sequence(start, length).unwrap();
        let (s, l) = (start as usize, length as usize);
        assert_eq!(digits.as_str(), &expected[s..s + l], "window {start}+{length}");
    }
}

#[test]
fn random_access_out_of_order() {
    let (service, _) = small_service();
    let late = service.get_sequence(40, 10).unwrap();
    let early = service.get_sequence(0, 10).unwrap();
    assert_eq!(late.as_str(), &PI_50[40..50]);
    assert_eq!(early.as_str(), &PI_50[..10]);
}

#[test]
fn repeated_queries_are_identical() {
    let (service, _) = small_service();
    let first = service.get_sequence(123, 45).unwrap();
    let second = service.get_sequence(123, 45).unwrap();
    assert_eq!(first, second);

    let fresh = PiService::default().get_sequence(123, 45).unwrap();
    assert_eq!(first, fresh);
}

#[test]
fn every_character_is_a_decimal_digit() {
    let (service, _) = small_service();
    let digits = service.get_sequence(0, 500).unwrap();
    assert_eq!(digits.len(), 500);
    assert!(digits.as_str().bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn feynman_point() {
    let (service, _) = small_service();
    assert_eq!(service.get_sequence(762, 6).unwrap().as_str(), "999999");
}

#[test]
fn invalid_ranges_are_rejected_before_generating() {
    let (service, _) = small_service();
    for (start, length) in [(-1, 5), (0, 0), (0, -3), (0, 501)] {
        let err = service.get_sequence(start, length).unwrap_err();
        assert!(
            matches!(err, QueryError::InvalidRange { .. }),
            "{start}+{length}: {err:?}"
        );
        assert!(err.is_caller_error());
    }
    assert_eq!(service.query_stats().materialized, 0);
}

#[test]
fn ceiling_is_reported_as_exhaustion() {
    let (service, _) = small_service();
    let err = service.get_sequence(1_900, 200).unwrap_err();
    assert_eq!(
        err,
        QueryError::GeneratorExhausted {
            requested_end: 2_100,
            ceiling: 2_000,
        }
    );
    assert!(service.get_sequence(1_950, 50).is_ok());
}

#[tokio::test]
async fn async_queries_match_blocking_ones() {
    let (service, _) = small_service();
    let token = CancellationToken::new();
    let digits = service.get_sequence_async(10, 40, &token).await.unwrap();
    assert_eq!(digits.as_str(), &PI_50[10..50]);
}
