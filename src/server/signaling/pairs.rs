use log::error;
use std::collections::HashMap;
use uuid::Uuid;

use super::error::SignalError;

/// Pair table: records which clients are currently in a session together.
///
/// Each pairing {a, b} is stored as two directed entries a -> b and b -> a so
/// partner lookup is O(1) from either side. The two directions are always
/// created and removed together; an asymmetric table indicates a logic bug
/// and is logged as an error.
pub struct PairTable {
    partners: HashMap<Uuid, Uuid>,
}

impl PairTable {
    pub fn new() -> Self {
        Self {
            partners: HashMap::new(),
        }
    }

    /// Create a pairing. Fails if either client already has a partner; a
    /// client can never be paired with itself.
    pub fn pair(&mut self, a: Uuid, b: Uuid) -> Result<(), SignalError> {
        if a == b || self.partners.contains_key(&a) {
            return Err(SignalError::AlreadyPaired(a));
        }
        if self.partners.contains_key(&b) {
            return Err(SignalError::AlreadyPaired(b));
        }
        self.partners.insert(a, b);
        self.partners.insert(b, a);
        Ok(())
    }

    /// Partner of `id`, if any.
    pub fn partner_of(&self, id: &Uuid) -> Option<Uuid> {
        let partner = self.partners.get(id).copied()?;
        if self.partners.get(&partner) != Some(id) {
            error!(
                "[Pairs] Asymmetric pair table: {} -> {} without reverse entry",
                id, partner
            );
        }
        Some(partner)
    }

    /// Whether `id` currently has a partner.
    pub fn is_paired(&self, id: &Uuid) -> bool {
        self.partners.contains_key(id)
    }

    /// Number of active pairings.
    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    /// Dissolve the pairing containing `id`, removing both directions.
    /// Returns the former partner, or `None` if `id` was not paired.
    pub fn unpair(&mut self, id: &Uuid) -> Option<Uuid> {
        let partner = self.partners.remove(id)?;
        match self.partners.remove(&partner) {
            Some(back) if back == *id => {}
            _ => error!(
                "[Pairs] Asymmetric pair table while unpairing {} -> {}",
                id, partner
            ),
        }
        Some(partner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_symmetric() {
        let mut table = PairTable::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        table.pair(a, b).unwrap();
        assert_eq!(table.partner_of(&a), Some(b));
        assert_eq!(table.partner_of(&b), Some(a));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn pair_rejects_self_pairing() {
        let mut table = PairTable::new();
        let a = Uuid::new_v4();

        assert_eq!(table.pair(a, a), Err(SignalError::AlreadyPaired(a)));
        assert!(!table.is_paired(&a));
    }

    #[test]
    fn pair_rejects_already_paired_member() {
        let mut table = PairTable::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        table.pair(a, b).unwrap();
        assert_eq!(table.pair(a, c), Err(SignalError::AlreadyPaired(a)));
        assert_eq!(table.pair(c, b), Err(SignalError::AlreadyPaired(b)));
        // The existing session is untouched.
        assert_eq!(table.partner_of(&a), Some(b));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unpair_removes_both_directions() {
        let mut table = PairTable::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        table.pair(a, b).unwrap();
        assert_eq!(table.unpair(&a), Some(b));
        assert_eq!(table.partner_of(&a), None);
        assert_eq!(table.partner_of(&b), None);
        assert_eq!(table.len(), 0);
        // Second unpair is a no-op.
        assert_eq!(table.unpair(&a), None);
    }
}
