//! Two-tier visibility: what cannot be missed, what may be noticed, what stays hidden.

use crate::config::ExploreConfig;
use crate::state::{FeatureKind, Mover, SettlementKind, Speed, TerrainFeature, TileFeature};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    /// Always discovered when present.
    Always,
    /// Discovered when a notice roll against the feature's DC succeeds.
    Sometimes,
    /// Never discovered automatically.
    Never,
}

/// Features of one tile split by visibility class, input order preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub constants: Vec<TileFeature>,
    pub possibles: Vec<TileFeature>,
    pub hidden: Vec<TileFeature>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityModel {
    notice_die: u32,
}

impl VisibilityModel {
    pub fn new(config: &ExploreConfig) -> Self {
        Self {
            notice_die: config.notice_die.max(2),
        }
    }

    pub fn notice_die(&self) -> u32 {
        self.notice_die
    }

    pub fn classify(mover: &Mover, _speed: Speed, feature: &TileFeature) -> Visibility {
        if feature.id == mover.id {
            return Visibility::Never;
        }

        match &feature.kind {
            FeatureKind::Terrain(TerrainFeature::Ground) => Visibility::Never,
            FeatureKind::Terrain(
                TerrainFeature::River | TerrainFeature::Mountain | TerrainFeature::Forest,
            ) => Visibility::Always,
            FeatureKind::Settlement(settlement)
                if settlement.kind == SettlementKind::Fortress
                    && feature.owner.is_player(mover.owner) =>
            {
                Visibility::Always
            }
            _ => Visibility::Sometimes,
        }
    }

    pub fn partition(mover: &Mover, speed: Speed, features: &[TileFeature]) -> Partition {
        let mut partition = Partition::default();
        for feature in features {
            let bucket = match Self::classify(mover, speed, feature) {
                Visibility::Always => &mut partition.constants,
                Visibility::Sometimes => &mut partition.possibles,
                Visibility::Never => &mut partition.hidden,
            };
            bucket.push(feature.clone());
        }
        partition
    }

    /// Whether a die showing `roll` notices a feature of difficulty `dc` at `speed`.
    pub fn notices(&self, roll: u32, speed: Speed, dc: u8) -> bool {
        roll as i64 + i64::from(speed.notice_modifier()) >= i64::from(dc)
    }

    /// Exact notice probability as `(favourable faces, die sides)`.
    pub fn notice_odds(&self, speed: Speed, dc: u8) -> (u32, u32) {
        let favourable = (1..=self.notice_die)
            .filter(|roll| self.notices(*roll, speed, dc))
            .count() as u32;
        (favourable, self.notice_die)
    }
}

impl Default for VisibilityModel {
    fn default() -> Self {
        Self::new(&ExploreConfig::default())
    }
}
