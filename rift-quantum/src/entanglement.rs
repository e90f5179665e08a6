//! Entanglement registry and symmetric linking
//!
//! Groups are tracked by id; tokens hold peer handles, never pointers,
//! so destroying one member cannot dangle the others.

use std::collections::HashMap;
use rift_core::prelude::*;
use crate::error::{QuantumError, QuantumResult};

/// Registry of entanglement groups
#[derive(Debug, Clone, Default)]
pub struct EntanglementRegistry {
    groups: HashMap<u64, Vec<TokenId>>,
    next_id: u64,
}

impl EntanglementRegistry {
    pub fn new() -> Self {
        Self { groups: HashMap::new(), next_id: 1 }
    }

    /// Link two tokens symmetrically under a fresh group id
    ///
    /// Both tokens get the Entangled flag and each other's handle; the
    /// registry records the group. Entangling a token with itself is
    /// refused.
    pub fn entangle(&mut self, a: &mut Token, b: &mut Token) -> QuantumResult<u64> {
        if a.id() == b.id() {
            return Err(QuantumError::SelfEntanglement);
        }

        let id = self.next_id;
        self.next_id += 1;

        a.attach_entanglement(Entanglement::new(id, vec![b.id()]));
        b.attach_entanglement(Entanglement::new(id, vec![a.id()]));
        self.groups.insert(id, vec![a.id(), b.id()]);
        Ok(id)
    }

    /// Remove a token's link and drop its group from the registry
    pub fn disentangle(&mut self, token: &mut Token) -> QuantumResult<u64> {
        let link = token.clear_entanglement().ok_or(QuantumError::NotEntangled)?;
        self.groups.remove(&link.id);
        Ok(link.id)
    }

    /// Members of a group, when it is still live
    pub fn group(&self, id: u64) -> Option<&[TokenId]> {
        self.groups.get(&id).map(|members| members.as_slice())
    }

    pub fn has_group(&self, id: u64) -> bool {
        self.groups.contains_key(&id)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

/// Check the symmetry invariant: A lists B exactly when B lists A
pub fn is_symmetric(a: &Token, b: &Token) -> bool {
    let a_lists_b = a
        .entanglement()
        .map(|link| link.has_peer(b.id()))
        .unwrap_or(false);
    let b_lists_a = b
        .entanglement()
        .map(|link| link.has_peer(a.id()))
        .unwrap_or(false);
    a_lists_b == b_lists_a
}
