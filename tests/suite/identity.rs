//! Pi-dentity generation

use pidigits_engine::{IDENTITY_LENGTH, RarityLabel};

use crate::common::small_service;

#[test]
fn fixed_seed_selects_a_fixed_window() {
    let (service, _) = small_service();
    let first = service.generate_identity(1_234).unwrap();
    let second = service.generate_identity(1_234).unwrap();
    assert_eq!(first.position, second.position);
    assert_eq!(first.sequence, second.sequence);
    assert_eq!(first.sequence.len() as u64, IDENTITY_LENGTH);
}

#[test]
fn identity_window_matches_get_sequence() {
    let (service, _) = small_service();
    let identity = service.generate_identity(777).unwrap();
    let digits = service
        .get_sequence(identity.position as i64, IDENTITY_LENGTH as i64)
        .unwrap();
    assert_eq!(identity.sequence, digits);
    assert_eq!(identity.score, identity.analysis.score());
}

#[test]
fn seed_zero_is_the_opening_digits() {
    let (service, _) = small_service();
    let identity = service.generate_identity(0).unwrap();
    assert_eq!(identity.position, 0);
    assert_eq!(identity.sequence.as_str(), "314159265358979");
    assert_eq!(identity.analysis.rarity, RarityLabel::Legendary);
}

#[test]
fn identity_serializes_with_timestamp() {
    let (service, _) = small_service();
    let identity = service.generate_identity(42).unwrap();
    let json = serde_json::to_value(&identity).unwrap();
    assert_eq!(json["position"], 42);
    assert!(json["created_at"].is_string());
    assert_eq!(json["analysis"]["length"], 15);
}
