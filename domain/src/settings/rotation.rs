//! Fixed turn order over the AI identities

use crate::core::error::DomainError;
use crate::core::identity::Identity;

/// Cyclic order in which AI identities take turns.
///
/// Configured once; never reordered while a chat runs. Slot indices wrap
/// modulo [`Rotation::len`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    order: Vec<Identity>,
}

impl Rotation {
    /// Build a rotation, rejecting empty orders, duplicates and the human.
    pub fn new(order: Vec<Identity>) -> Result<Self, DomainError> {
        if order.is_empty() {
            return Err(DomainError::EmptyRotation);
        }
        for (i, identity) in order.iter().enumerate() {
            if identity.is_human() {
                return Err(DomainError::HumanInRotation);
            }
            if order[..i].contains(identity) {
                return Err(DomainError::DuplicateInRotation(*identity));
            }
        }
        Ok(Self { order })
    }

    /// Identity occupying `slot`, wrapping past the end
    pub fn at(&self, slot: usize) -> Identity {
        self.order[slot % self.order.len()]
    }

    /// Slot following `slot`
    pub fn next_slot(&self, slot: usize) -> usize {
        (slot + 1) % self.order.len()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// A constructed rotation is never empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.order.contains(&identity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Identity> + '_ {
        self.order.iter().copied()
    }
}

impl Default for Rotation {
    /// Grok → Gemini → OpenAI → DeepSeek → Z.ai
    fn default() -> Self {
        Self {
            order: Identity::AI.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let rotation = Rotation::default();
        assert_eq!(rotation.len(), 5);
        assert_eq!(rotation.at(0), Identity::Grok);
        assert_eq!(rotation.at(4), Identity::Zai);
    }

    #[test]
    fn test_slot_wraps() {
        let rotation = Rotation::new(vec![Identity::Gemini, Identity::Grok]).unwrap();
        assert_eq!(rotation.next_slot(0), 1);
        assert_eq!(rotation.next_slot(1), 0);
        assert_eq!(rotation.at(5), Identity::Grok);
    }

    #[test]
    fn test_pointer_after_k_turns() {
        let rotation = Rotation::default();
        let mut slot = 0;
        for k in 1..=12 {
            slot = rotation.next_slot(slot);
            assert_eq!(slot, k % rotation.len());
        }
    }

    #[test]
    fn test_rejects_invalid_orders() {
        assert_eq!(Rotation::new(vec![]), Err(DomainError::EmptyRotation));
        assert_eq!(
            Rotation::new(vec![Identity::Grok, Identity::User]),
            Err(DomainError::HumanInRotation)
        );
        assert_eq!(
            Rotation::new(vec![Identity::Grok, Identity::Gemini, Identity::Grok]),
            Err(DomainError::DuplicateInRotation(Identity::Grok))
        );
    }
}
