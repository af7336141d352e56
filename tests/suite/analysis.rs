//! Pattern and rarity analysis

use pidigits_engine::{Complexity, PatternKind, QueryError, RarityLabel};

use crate::common::{PI_50, small_service};

#[test]
fn adjacent_repeats_and_runs() {
    let (service, _) = small_service();
    let report = service.analyze_sequence("11233").unwrap();

    let repeats: Vec<_> = report
        .patterns_of(PatternKind::Repeat)
        .map(|p| (p.value.as_str(), p.offset))
        .collect();
    assert_eq!(repeats, [("1", 0), ("3", 3)]);

    let ascending: Vec<_> = report
        .patterns_of(PatternKind::Ascending)
        .map(|p| (p.value.as_str(), p.offset))
        .collect();
    assert_eq!(ascending, [("123", 1)]);
    assert_eq!(report.patterns_of(PatternKind::Descending).count(), 0);
    assert_eq!(report.rarity, RarityLabel::Rare);
}

#[test]
fn leading_decimal_point_is_ignored() {
    let (service, _) = small_service();
    let with_point = service.analyze_sequence("3.14159").unwrap();
    let without = service.analyze_sequence("314159").unwrap();
    assert_eq!(with_point, without);
    assert!(with_point.pi_related);
    assert_eq!(with_point.complexity, Complexity::Complex);
}

#[test]
fn empty_window_is_common_and_patternless() {
    let (service, _) = small_service();
    let report = service.analyze_sequence("").unwrap();
    assert!(report.patterns.is_empty());
    assert_eq!(report.rarity, RarityLabel::Common);
    assert_eq!(report.length, 0);
    assert_eq!(report.score(), 100);
}

#[test]
fn non_digit_input_is_rejected() {
    let (service, _) = small_service();
    let err = service.analyze_sequence("31a4").unwrap_err();
    assert_eq!(err, QueryError::InvalidSequence { offset: 2, found: 'a' });
}

#[test]
fn rarity_never_drops_as_repetition_grows() {
    let (service, _) = small_service();
    let mut previous = RarityLabel::Common;
    for len in 1..=PI_50.len() {
        let report = service.analyze_sequence(&PI_50[..len]).unwrap();
        assert!(report.rarity >= previous, "prefix of {len}");
        previous = report.rarity;
    }
    assert_eq!(previous, RarityLabel::Legendary);
}

#[test]
fn report_serializes_for_clients() {
    let (service, _) = small_service();
    let report = service.analyze_sequence("9876").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["rarity"], "Common");
    assert_eq!(json["complexity"], "simple");
    assert_eq!(json["patterns"][0]["type"], "descending");
    assert_eq!(json["patterns"][0]["value"], "987");
    assert_eq!(json["patterns"][1]["offset"], 1);
}
