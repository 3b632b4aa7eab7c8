//! Officer records.

use franchise_types::{ActorId, ConstituencyId};
use serde::{Deserialize, Serialize};

/// An election officer scoped to exactly one constituency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub actor: ActorId,
    pub name: String,
    pub constituency: ConstituencyId,
}

impl Officer {
    /// Whether this officer may act on subjects of `constituency`.
    pub fn serves(&self, constituency: ConstituencyId) -> bool {
        self.constituency == constituency
    }
}
