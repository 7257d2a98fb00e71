use crate::{Error, MicroShardId, Result};
use ::uuid::Uuid;

impl From<MicroShardId> for Uuid {
    fn from(id: MicroShardId) -> Self {
        Self::from_u128(id.to_u128())
    }
}

impl TryFrom<Uuid> for MicroShardId {
    type Error = Error;

    /// Accepts only UUIDs carrying version 8 and the RFC 9562 variant.
    fn try_from(uuid: Uuid) -> Result<Self> {
        Self::from_u128(uuid.as_u128()).validate()
    }
}
