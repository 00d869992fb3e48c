//! Hex helpers for roots in logs and receipts.

use game_core::WorldState;

/// Full hex encoding of a 32-byte root.
pub fn root_hex(root: &[u8; 32]) -> String {
    hex::encode(root)
}

/// First 8 bytes of the state root as hex, for compact logging.
pub fn short_state_hash(state: &WorldState) -> String {
    let root = state.state_root();
    hex::encode(&root[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_is_prefix_of_root() {
        let state = WorldState::new();
        let short = short_state_hash(&state);
        assert_eq!(short.len(), 16);
        assert!(root_hex(&state.state_root()).starts_with(&short));
    }
}
