//! Superposition, collapse, measurement and entropy

use std::sync::Arc;
use num_complex::Complex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use rift_core::prelude::*;
use crate::error::{QuantumError, QuantumResult};

/// One probabilistic observation of a superposed token
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Index of the observed state
    pub index: usize,
    /// |amplitude|² of that state
    pub probability: f64,
}

/// Put a token into superposition over the given states
///
/// Omitted amplitudes default to uniform √(1/N). Explicit amplitudes
/// must match the state count and normalize to unity within the core
/// tolerance; any violation returns an error and leaves the token
/// untouched.
pub fn superpose(
    token: &mut Token,
    states: Vec<Arc<Token>>,
    amplitudes: Option<Vec<f64>>,
) -> QuantumResult<()> {
    if states.is_empty() {
        return Err(QuantumError::NoStates);
    }

    let amplitudes = match amplitudes {
        Some(amps) => {
            if amps.len() != states.len() {
                return Err(QuantumError::AmplitudeMismatch {
                    states: states.len(),
                    amplitudes: amps.len(),
                });
            }
            let norm: f64 = amps.iter().map(|a| a * a).sum();
            if (norm - 1.0).abs() > NORMALIZATION_TOLERANCE {
                return Err(QuantumError::NotNormalized(norm));
            }
            amps
        }
        None => {
            let uniform = (1.0 / states.len() as f64).sqrt();
            vec![uniform; states.len()]
        }
    };

    token.attach_superposition(Superposition::new(states, amplitudes));
    Ok(())
}

/// Force the superposition to resolve to one state
///
/// Copies the selected state's (type, value) into the target, then
/// frees the superposition and clears the Superposed flag.
pub fn collapse(token: &mut Token, index: usize) -> QuantumResult<()> {
    let (target_type, target_value) = {
        let sp = token.superposition().ok_or(QuantumError::NotSuperposed)?;
        let state = sp
            .states
            .get(index)
            .ok_or(QuantumError::IndexOutOfRange { index, len: sp.states.len() })?;
        (state.token_type(), state.value().clone())
    };

    token.adopt(target_type, target_value);
    token.clear_superposition();
    Ok(())
}

/// Observe the token without collapsing it
///
/// Index selection is uniform; the returned probability is the
/// |amplitude|² of the selected state.
pub fn measure(token: &Token) -> QuantumResult<Measurement> {
    let sp = token.superposition().ok_or(QuantumError::NotSuperposed)?;
    if sp.states.is_empty() {
        return Err(QuantumError::NoStates);
    }

    let index = rand::thread_rng().gen_range(0..sp.states.len());
    Ok(Measurement {
        index,
        probability: probabilities(sp)[index],
    })
}

/// Shannon entropy of the superposition: −Σ pᵢ log₂ pᵢ
pub fn entropy(token: &Token) -> QuantumResult<f64> {
    let sp = token.superposition().ok_or(QuantumError::NotSuperposed)?;
    if sp.states.is_empty() {
        return Err(QuantumError::NoStates);
    }

    Ok(probabilities(sp)
        .into_iter()
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum())
}

/// Amplitudes composed with the global phase, as complex phasors
pub fn phasors(sp: &Superposition) -> Vec<Complex<f64>> {
    sp.amplitudes
        .iter()
        .map(|a| Complex::from_polar(*a, sp.phase))
        .collect()
}

/// Per-state probabilities: the squared modulus of each phasor
pub fn probabilities(sp: &Superposition) -> Vec<f64> {
    phasors(sp).into_iter().map(|c| c.norm_sqr()).collect()
}
