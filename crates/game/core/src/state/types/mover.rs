use super::{FeatureId, PlayerId};

/// The unit whose movement and discoveries are being tracked.
///
/// Location and remaining movement points live elsewhere: the map
/// owns the former and the exploration session the latter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mover {
    /// Id of the unit feature representing this mover on the master map.
    pub id: FeatureId,
    pub owner: PlayerId,
    pub kind: String,
    pub name: String,
}

impl Mover {
    pub fn new(
        id: FeatureId,
        owner: PlayerId,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner,
            kind: kind.into(),
            name: name.into(),
        }
    }
}
