//! Commitment over an ordered action sequence.

use sha2::{Digest, Sha256};

use super::payload::{PayloadError, PlainAction};

/// SHA-256 over the canonical bytes of each action, in sequence order.
///
/// Each action's bytes are length-prefixed so that adjacent actions cannot be
/// re-split into a different sequence with the same digest.
pub fn compute_actions_root(actions: &[PlainAction]) -> Result<[u8; 32], PayloadError> {
    let mut hasher = Sha256::new();
    for action in actions {
        let bytes = action.to_bytes()?;
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }
    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Payload;

    #[test]
    fn order_matters() {
        let a = PlainAction::new("a", Payload::new());
        let b = PlainAction::new("b", Payload::new());
        assert_ne!(
            compute_actions_root(&[a.clone(), b.clone()]).unwrap(),
            compute_actions_root(&[b, a]).unwrap()
        );
    }

    #[test]
    fn empty_sequence_has_fixed_root() {
        assert_eq!(
            hex::encode(compute_actions_root(&[]).unwrap()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
