//! Unit tests for quantum token operations

use std::sync::Arc;
use rift_core::prelude::*;
use crate::entanglement::{is_symmetric, EntanglementRegistry};
use crate::error::QuantumError;
use crate::superposition::{collapse, entropy, measure, probabilities, superpose};

fn quantum_token() -> Token {
    let mut token = Token::new(TokenType::QInt, Span::new(SpanKind::Superposed, 32));
    token.set_value(TokenValue::Int(0));
    token
}

fn state(value: i64) -> Arc<Token> {
    let mut token = Token::new(TokenType::Int, Span::new(SpanKind::Fixed, 8));
    token.set_value(TokenValue::Int(value));
    Arc::new(token)
}

#[test]
fn default_amplitudes_are_uniform() {
    let mut token = quantum_token();
    superpose(&mut token, vec![state(1), state(2), state(3)], None).unwrap();

    let sp = token.superposition().unwrap();
    let expected = (1.0_f64 / 3.0).sqrt();
    for amplitude in &sp.amplitudes {
        assert!((amplitude - expected).abs() < 1e-9);
    }
    assert!((sp.norm_sum() - 1.0).abs() <= NORMALIZATION_TOLERANCE);
    assert!(token.bits().contains(ValidationBits::SUPERPOSED));
}

#[test]
fn uniform_entropy_is_log2_of_state_count() {
    let mut token = quantum_token();
    superpose(&mut token, vec![state(1), state(2), state(3)], None).unwrap();
    assert!((entropy(&token).unwrap() - 3.0_f64.log2()).abs() < 1e-9);
}

#[test]
fn explicit_amplitudes_must_be_normalized() {
    let mut token = quantum_token();
    let result = superpose(
        &mut token,
        vec![state(1), state(2)],
        Some(vec![0.9, 0.9]),
    );
    assert!(matches!(result, Err(QuantumError::NotNormalized(_))));
    assert!(token.superposition().is_none());
    assert!(!token.bits().contains(ValidationBits::SUPERPOSED));
}

#[test]
fn amplitude_count_must_match_state_count() {
    let mut token = quantum_token();
    let result = superpose(&mut token, vec![state(1), state(2)], Some(vec![1.0]));
    assert_eq!(
        result,
        Err(QuantumError::AmplitudeMismatch { states: 2, amplitudes: 1 })
    );
}

#[test]
fn empty_superposition_is_refused() {
    let mut token = quantum_token();
    assert_eq!(superpose(&mut token, Vec::new(), None), Err(QuantumError::NoStates));
}

#[test]
fn superposed_token_passes_validation() {
    let mut token = quantum_token();
    superpose(&mut token, vec![state(1), state(2)], None).unwrap();
    token.validate().unwrap();
    assert!(token.bits().contains(ValidationBits::GOVERNED));
}

#[test]
fn collapse_adopts_the_selected_state() {
    let mut token = quantum_token();
    superpose(&mut token, vec![state(10), state(20)], None).unwrap();

    collapse(&mut token, 1).unwrap();
    assert_eq!(token.value().as_int(), Some(20));
    assert_eq!(token.token_type(), TokenType::Int);
    assert!(token.superposition().is_none());
    assert!(!token.bits().contains(ValidationBits::SUPERPOSED));
}

#[test]
fn collapse_index_is_bounds_checked() {
    let mut token = quantum_token();
    superpose(&mut token, vec![state(10)], None).unwrap();
    assert_eq!(
        collapse(&mut token, 3),
        Err(QuantumError::IndexOutOfRange { index: 3, len: 1 })
    );
    // Failed collapse leaves the superposition in place.
    assert!(token.superposition().is_some());
}

#[test]
fn collapse_without_superposition_fails() {
    let mut token = quantum_token();
    assert_eq!(collapse(&mut token, 0), Err(QuantumError::NotSuperposed));
}

#[test]
fn measure_returns_state_probability() {
    let mut token = quantum_token();
    superpose(&mut token, vec![state(1), state(2), state(3), state(4)], None).unwrap();

    for _ in 0..32 {
        let outcome = measure(&token).unwrap();
        assert!(outcome.index < 4);
        assert!((outcome.probability - 0.25).abs() < 1e-9);
    }
    // Measurement never collapses.
    assert!(token.bits().contains(ValidationBits::SUPERPOSED));
}

#[test]
fn probabilities_square_the_amplitudes() {
    let mut token = quantum_token();
    superpose(&mut token, vec![state(1), state(2)], Some(vec![0.6, 0.8])).unwrap();

    let probs = probabilities(token.superposition().unwrap());
    assert!((probs[0] - 0.36).abs() < 1e-9);
    assert!((probs[1] - 0.64).abs() < 1e-9);
}

#[test]
fn entangle_is_symmetric() {
    let mut registry = EntanglementRegistry::new();
    let mut a = quantum_token();
    let mut b = quantum_token();

    let id = registry.entangle(&mut a, &mut b).unwrap();
    assert!(a.entanglement().unwrap().has_peer(b.id()));
    assert!(b.entanglement().unwrap().has_peer(a.id()));
    assert!(is_symmetric(&a, &b));
    assert_eq!(registry.group(id).unwrap(), &[a.id(), b.id()]);

    assert!(a.bits().contains(ValidationBits::ENTANGLED));
    assert!(b.bits().contains(ValidationBits::ENTANGLED));
}

#[test]
fn registry_tracks_independent_groups() {
    let mut registry = EntanglementRegistry::new();
    let mut a = quantum_token();
    let mut b = quantum_token();
    let first = registry.entangle(&mut a, &mut b).unwrap();

    let mut c = quantum_token();
    let mut d = quantum_token();
    let second = registry.entangle(&mut c, &mut d).unwrap();

    assert_ne!(first, second);
    assert_eq!(registry.group_count(), 2);
}

#[test]
fn entangled_token_passes_validation() {
    let mut registry = EntanglementRegistry::new();
    let mut a = quantum_token();
    let mut b = quantum_token();
    registry.entangle(&mut a, &mut b).unwrap();

    a.validate().unwrap();
    b.validate().unwrap();
}

#[test]
fn disentangle_clears_link_and_group() {
    let mut registry = EntanglementRegistry::new();
    let mut a = quantum_token();
    let mut b = quantum_token();
    let id = registry.entangle(&mut a, &mut b).unwrap();

    registry.disentangle(&mut a).unwrap();
    assert!(a.entanglement().is_none());
    assert!(!a.bits().contains(ValidationBits::ENTANGLED));
    assert!(!registry.has_group(id));

    assert_eq!(registry.disentangle(&mut a), Err(QuantumError::NotEntangled));
}
