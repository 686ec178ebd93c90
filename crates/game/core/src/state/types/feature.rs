//! Discrete map content stored at a point.
//!
//! Every feature carries the same envelope (id, owner, discovery difficulty)
//! around a kind-specific payload. Copies handed to per-player maps go through
//! [`TileFeature::copy`] so owner and magnitude data can be stripped.

use super::{FeatureId, Owner};

/// Directive used when copying a feature into a subordinate map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum CopyMode {
    /// Exact clone.
    Keep,
    /// Owner and population/extent/quantity data stripped.
    Zero,
}

/// Natural features that shape a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainFeature {
    River,
    Mountain,
    Forest,
    Cave,
    Spring,
    /// Unexposed ground; only revealed by digging or an explicit search.
    Ground,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wildlife {
    pub species: String,
    pub count: u32,
    /// True for the "tracks" stand-in left by an animal nobody saw.
    pub tracks: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SettlementKind {
    Fortress,
    Town,
    Village,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    pub kind: SettlementKind,
    pub name: String,
    pub population: u32,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitFeature {
    pub name: String,
    pub kind: String,
    pub immortal: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub name: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureKind {
    Terrain(TerrainFeature),
    Wildlife(Wildlife),
    Settlement(Settlement),
    Unit(UnitFeature),
    Resource(Resource),
    Landmark(String),
}

/// A single feature present on a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileFeature {
    pub id: FeatureId,
    pub owner: Owner,
    /// Discovery difficulty; lower is easier to notice.
    pub dc: u8,
    pub kind: FeatureKind,
}

impl TileFeature {
    pub fn new(id: FeatureId, owner: Owner, dc: u8, kind: FeatureKind) -> Self {
        Self {
            id,
            owner,
            dc,
            kind,
        }
    }

    pub fn terrain(id: FeatureId, feature: TerrainFeature) -> Self {
        Self::new(id, Owner::Independent, 0, FeatureKind::Terrain(feature))
    }

    pub fn wildlife(id: FeatureId, species: impl Into<String>, count: u32, dc: u8) -> Self {
        Self::new(
            id,
            Owner::Independent,
            dc,
            FeatureKind::Wildlife(Wildlife {
                species: species.into(),
                count,
                tracks: false,
            }),
        )
    }

    pub fn settlement(
        id: FeatureId,
        owner: Owner,
        kind: SettlementKind,
        name: impl Into<String>,
        population: u32,
        dc: u8,
    ) -> Self {
        Self::new(
            id,
            owner,
            dc,
            FeatureKind::Settlement(Settlement {
                kind,
                name: name.into(),
                population,
                active: true,
            }),
        )
    }

    pub fn unit(
        id: FeatureId,
        owner: Owner,
        name: impl Into<String>,
        kind: impl Into<String>,
        dc: u8,
    ) -> Self {
        Self::new(
            id,
            owner,
            dc,
            FeatureKind::Unit(UnitFeature {
                name: name.into(),
                kind: kind.into(),
                immortal: false,
            }),
        )
    }

    pub fn resource(id: FeatureId, name: impl Into<String>, quantity: u32, dc: u8) -> Self {
        Self::new(
            id,
            Owner::Independent,
            dc,
            FeatureKind::Resource(Resource {
                name: name.into(),
                quantity,
            }),
        )
    }

    /// Tracks left by `animal`, standing in for a sighting that did not happen.
    pub fn tracks_of(animal: &TileFeature) -> Self {
        let species = match &animal.kind {
            FeatureKind::Wildlife(wildlife) => wildlife.species.clone(),
            other => describe_kind(other),
        };
        Self::new(
            FeatureId::Ephemeral,
            Owner::Independent,
            animal.dc.saturating_sub(2),
            FeatureKind::Wildlife(Wildlife {
                species,
                count: 0,
                tracks: true,
            }),
        )
    }

    #[must_use]
    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = id;
        self
    }

    pub fn as_settlement(&self) -> Option<&Settlement> {
        match &self.kind {
            FeatureKind::Settlement(settlement) => Some(settlement),
            _ => None,
        }
    }

    pub fn as_unit(&self) -> Option<&UnitFeature> {
        match &self.kind {
            FeatureKind::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn terrain_feature(&self) -> Option<TerrainFeature> {
        match self.kind {
            FeatureKind::Terrain(feature) => Some(feature),
            _ => None,
        }
    }

    pub fn is_settlement(&self) -> bool {
        matches!(self.kind, FeatureKind::Settlement(_))
    }

    pub fn is_wildlife(&self) -> bool {
        matches!(self.kind, FeatureKind::Wildlife(_))
    }

    pub fn is_tracks(&self) -> bool {
        matches!(&self.kind, FeatureKind::Wildlife(wildlife) if wildlife.tracks)
    }

    /// True when the payload carries population, head-count or quantity data.
    pub fn has_magnitude(&self) -> bool {
        matches!(
            self.kind,
            FeatureKind::Wildlife(_) | FeatureKind::Settlement(_) | FeatureKind::Resource(_)
        )
    }

    /// Short human-readable description.
    pub fn description(&self) -> String {
        let base = describe_kind(&self.kind);
        match self.owner {
            Owner::Independent | Owner::Unknown => base,
            owner @ Owner::Player(_) => format!("{base} ({owner})"),
        }
    }

    /// Produces a clone suitable for a subordinate map.
    ///
    /// The id is preserved in both modes so the copy can later be matched
    /// against the master record.
    pub fn copy(&self, mode: CopyMode) -> TileFeature {
        let mut copy = self.clone();
        if mode == CopyMode::Keep {
            return copy;
        }

        copy.owner = Owner::Unknown;
        match &mut copy.kind {
            FeatureKind::Wildlife(wildlife) => wildlife.count = 0,
            FeatureKind::Settlement(settlement) => settlement.population = 0,
            FeatureKind::Resource(resource) => resource.quantity = 0,
            FeatureKind::Terrain(_) | FeatureKind::Unit(_) | FeatureKind::Landmark(_) => {}
        }
        copy
    }
}

fn describe_kind(kind: &FeatureKind) -> String {
    match kind {
        FeatureKind::Terrain(feature) => feature.to_string(),
        FeatureKind::Wildlife(wildlife) if wildlife.tracks => {
            format!("tracks of {}", wildlife.species)
        }
        FeatureKind::Wildlife(wildlife) if wildlife.count > 0 => {
            format!("{} x{}", wildlife.species, wildlife.count)
        }
        FeatureKind::Wildlife(wildlife) => wildlife.species.clone(),
        FeatureKind::Settlement(settlement) => {
            let state = if settlement.active { "" } else { "abandoned " };
            format!("{state}{} {}", settlement.kind, settlement.name)
        }
        FeatureKind::Unit(unit) => format!("{} the {}", unit.name, unit.kind),
        FeatureKind::Resource(resource) => resource.name.clone(),
        FeatureKind::Landmark(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerId;

    fn rival_town() -> TileFeature {
        TileFeature::settlement(
            FeatureId::Persistent(7),
            Owner::Player(PlayerId(2)),
            SettlementKind::Town,
            "Varn",
            340,
            8,
        )
    }

    #[test]
    fn zero_copy_hides_owner_and_population() {
        let town = rival_town();
        let copy = town.copy(CopyMode::Zero);

        assert_eq!(copy.id, town.id);
        assert_eq!(copy.owner, Owner::Unknown);
        assert_eq!(copy.as_settlement().map(|s| s.population), Some(0));
        assert!(!copy.description().contains("player 2"));
    }

    #[test]
    fn keep_copy_is_exact() {
        let town = rival_town();
        assert_eq!(town.copy(CopyMode::Keep), town);
    }

    #[test]
    fn tracks_are_ephemeral_and_easier_to_spot() {
        let deer = TileFeature::wildlife(FeatureId::Ephemeral, "deer", 4, 9);
        let tracks = TileFeature::tracks_of(&deer);

        assert!(tracks.id.is_ephemeral());
        assert!(tracks.is_tracks());
        assert!(!deer.is_tracks());
        assert_eq!(tracks.dc, 7);
        assert_eq!(tracks.description(), "tracks of deer");
    }

    #[test]
    fn description_mentions_player_owner() {
        assert_eq!(rival_town().description(), "town Varn (player 2)");
    }
}
