use serde::{Deserialize, Serialize};

use super::ClientCategory;
use crate::values::{InstrumentId, UserId};

/// The (user, client category, instrument) tuple one ledger independently
/// tracks
///
/// `Ord` so entity-keyed maps can be `BTreeMap` and every iteration over
/// entities is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub user_id: UserId,
    pub category: ClientCategory,
    pub instrument: InstrumentId,
}

impl EntityKey {
    pub fn new(
        user_id: impl Into<UserId>,
        category: ClientCategory,
        instrument: impl Into<InstrumentId>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            category,
            instrument: instrument.into(),
        }
    }
}
