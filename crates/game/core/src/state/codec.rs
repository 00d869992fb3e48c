//! Record (de)serialization.
//!
//! Sub-state records are stored as canonical JSON: struct fields are written
//! in declaration order and every map is a `BTreeMap`, so equal records always
//! encode to equal bytes. JSON gives records a versioned evolution path:
//! fields added later are `#[serde(default)]` and omitted when empty, so
//! records written before the field existed still decode.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::StateError;
use crate::address::Address;

pub fn encode_record<T: Serialize>(address: Address, record: &T) -> Result<Vec<u8>, StateError> {
    serde_json::to_vec(record).map_err(|error| StateError::Serialize {
        address,
        reason: error.to_string(),
    })
}

/// Decodes a whole record or fails; partially built records are never returned.
pub fn decode_record<T: DeserializeOwned>(address: Address, bytes: &[u8]) -> Result<T, StateError> {
    serde_json::from_slice(bytes).map_err(|error| StateError::Deserialize {
        address,
        reason: error.to_string(),
    })
}

/// Block indices that must never be negative.
///
/// Decoding reads a signed integer and hard-fails on negative values instead
/// of clamping them.
pub mod block_index {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let value = i64::deserialize(deserializer)?;
        u64::try_from(value).map_err(|_| {
            D::Error::custom(format!("block index must be non-negative, found {value}"))
        })
    }
}

/// Optional variant of [`block_index`]; use with `#[serde(default)]`.
pub mod optional_block_index {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(index) => serializer.serialize_some(index),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None => Ok(None),
            Some(value) => u64::try_from(value).map(Some).map_err(|_| {
                D::Error::custom(format!("block index must be non-negative, found {value}"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Locked {
        #[serde(with = "block_index")]
        required_block_index: u64,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "optional_block_index"
        )]
        expires_at: Option<u64>,
    }

    #[test]
    fn absent_optional_field_decodes_to_default() {
        let record: Locked =
            decode_record(Address::ZERO, br#"{"required_block_index":5}"#).unwrap();
        assert_eq!(
            record,
            Locked {
                required_block_index: 5,
                expires_at: None
            }
        );
        assert_eq!(
            encode_record(Address::ZERO, &record).unwrap(),
            br#"{"required_block_index":5}"#.to_vec()
        );
    }

    #[test]
    fn negative_block_index_hard_fails() {
        let error = decode_record::<Locked>(Address::ZERO, br#"{"required_block_index":-1}"#)
            .unwrap_err();
        assert!(matches!(error, StateError::Deserialize { .. }));

        let error = decode_record::<Locked>(
            Address::ZERO,
            br#"{"required_block_index":1,"expires_at":-3}"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("non-negative"));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let error = decode_record::<Locked>(Address::ZERO, b"\x00\x01").unwrap_err();
        assert!(matches!(error, StateError::Deserialize { .. }));
    }
}
