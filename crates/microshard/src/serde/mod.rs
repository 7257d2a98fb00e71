//! `#[serde(with = ...)]` adapters for [`MicroShardId`] fields.
//!
//! - [`as_canonical`]: the 36-character hyphenated string. Input is parsed
//!   strictly (32-character plain hex is accepted too).
//! - [`as_bytes`]: the 16-byte big-endian form. Unlike
//!   [`MicroShardId::from_bytes`], input is checked for the version and
//!   variant markers, since serialized data crosses a trust boundary.
//!
//! [`MicroShardId`]: crate::MicroShardId
//! [`MicroShardId::from_bytes`]: crate::MicroShardId::from_bytes

use serde::{Deserializer, Serializer};

pub mod as_canonical {
    use super::*;
    use crate::MicroShardId;

    pub fn serialize<S>(id: &MicroShardId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(id.encode_hex().as_str())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<MicroShardId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CanonicalVisitor;

        impl serde::de::Visitor<'_> for CanonicalVisitor {
            type Value = MicroShardId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a hyphenated UUIDv8 MicroShard string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                MicroShardId::parse(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(CanonicalVisitor)
    }
}

pub mod as_bytes {
    use super::*;
    use crate::{BYTES_LEN, MicroShardId};
    use serde::de::{Error as _, SeqAccess};

    pub fn serialize<S>(id: &MicroShardId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_bytes(&id.to_bytes())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<MicroShardId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BytesVisitor;

        impl<'de> serde::de::Visitor<'de> for BytesVisitor {
            type Value = MicroShardId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("16 big-endian bytes")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                MicroShardId::try_from_slice(v)
                    .and_then(MicroShardId::validate)
                    .map_err(E::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes = [0_u8; BYTES_LEN];
                for (i, slot) in bytes.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| A::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(A::Error::invalid_length(BYTES_LEN + 1, &self));
                }
                MicroShardId::from_bytes(bytes)
                    .validate()
                    .map_err(A::Error::custom)
            }
        }

        d.deserialize_bytes(BytesVisitor)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::MicroShardId;
    use serde::{Deserialize, Serialize};

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "as_canonical")]
        event_id: MicroShardId,
    }

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct BinaryRow {
        #[serde(with = "as_bytes")]
        event_id: MicroShardId,
    }

    fn sample() -> MicroShardId {
        MicroShardId::encode(1_672_531_200_000_000, 1, 0).unwrap()
    }

    #[test]
    fn canonical_roundtrip() {
        let row = Row {
            event_id: sample(),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(
            json,
            r#"{"event_id":"17c4a210-3500-8000-8000-001000000000"}"#
        );
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn canonical_accepts_uppercase_and_plain() {
        let back: Row =
            serde_json::from_str(r#"{"event_id":"17C4A210350080008000001000000000"}"#)
                .expect("deserialize");
        assert_eq!(back.event_id, sample());
    }

    #[test]
    fn canonical_rejects_bad_markers() {
        let err = serde_json::from_str::<Row>(
            r#"{"event_id":"17c4a210-3500-7000-8000-001000000000"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid version"), "{err}");

        assert!(serde_json::from_str::<Row>(r#"{"event_id":42}"#).is_err());
    }

    #[test]
    fn bytes_roundtrip() {
        let row = BinaryRow {
            event_id: sample(),
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(
            json,
            r#"{"event_id":[23,196,162,16,53,0,128,0,128,0,0,16,0,0,0,0]}"#
        );
        let back: BinaryRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn bytes_are_validated() {
        // version nibble 7
        let err = serde_json::from_str::<BinaryRow>(
            r#"{"event_id":[23,196,162,16,53,0,112,0,128,0,0,16,0,0,0,0]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid version"), "{err}");

        let err = serde_json::from_str::<BinaryRow>(r#"{"event_id":[1,2,3]}"#).unwrap_err();
        assert!(err.to_string().contains("invalid length 3"), "{err}");

        let err = serde_json::from_str::<BinaryRow>(
            r#"{"event_id":[23,196,162,16,53,0,128,0,128,0,0,16,0,0,0,0,0]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid length 17"), "{err}");
    }
}
