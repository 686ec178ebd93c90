//! Picks the features discovered on arrival.
//!
//! Constants are always kept. Every possible gets its own independent notice
//! roll, so the number discovered is not fixed in advance. The inputs are
//! borrowed and never reordered.

use super::{RollKey, VisibilityModel};
use crate::env::{Encounter, RngOracle};
use crate::state::{FeatureId, Speed, TileFeature};

/// Roll contexts below this value are reserved for per-candidate notice rolls.
const ENCOUNTER_CONTEXT: u32 = u32::MAX;

/// Features discovered on one tile: constants first, then noticed possibles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Discovery {
    pub constants: Vec<TileFeature>,
    pub possibles: Vec<TileFeature>,
}

impl Discovery {
    pub fn iter(&self) -> impl Iterator<Item = &TileFeature> {
        self.constants.iter().chain(self.possibles.iter())
    }

    pub fn len(&self) -> usize {
        self.constants.len() + self.possibles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty() && self.possibles.is_empty()
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.iter().any(|feature| feature.id == id)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TileFeature> {
        self.constants.iter_mut().chain(self.possibles.iter_mut())
    }
}

/// Entry of a multi-select list pre-populated from a discovery run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preselected {
    pub feature: TileFeature,
    pub checked: bool,
    /// Constants cannot be unchecked.
    pub locked: bool,
}

pub struct DiscoverySelector<'a> {
    rng: &'a dyn RngOracle,
    visibility: VisibilityModel,
    key: RollKey,
}

impl<'a> DiscoverySelector<'a> {
    pub fn new(rng: &'a dyn RngOracle, visibility: VisibilityModel, key: RollKey) -> Self {
        Self {
            rng,
            visibility,
            key,
        }
    }

    /// Selector for searching the same tile again with fresh rolls.
    #[must_use]
    pub fn next_pass(&self) -> Self {
        Self {
            rng: self.rng,
            visibility: self.visibility,
            key: self.key.next_pass(),
        }
    }

    fn noticed(&self, index: usize, speed: Speed, feature: &TileFeature) -> bool {
        let seed = self.key.seed(index as u32);
        let roll = self.rng.roll_die(seed, self.visibility.notice_die());
        self.visibility.notices(roll, speed, feature.dc)
    }

    /// Ordered union of all constants and the possibles that pass their notice roll.
    pub fn select(
        &self,
        constants: &[TileFeature],
        possibles: &[TileFeature],
        speed: Speed,
    ) -> Discovery {
        let possibles = possibles
            .iter()
            .enumerate()
            .filter(|(index, feature)| self.noticed(*index, speed, feature))
            .map(|(_, feature)| feature.clone())
            .collect();

        Discovery {
            constants: constants.to_vec(),
            possibles,
        }
    }

    /// Every candidate in display order with its initial check state.
    ///
    /// Constants come first, checked and locked, in their input order; the
    /// possibles follow, checked when their notice roll succeeds.
    pub fn preselect(
        &self,
        constants: &[TileFeature],
        possibles: &[TileFeature],
        speed: Speed,
    ) -> Vec<Preselected> {
        let constants = constants.iter().map(|feature| Preselected {
            feature: feature.clone(),
            checked: true,
            locked: true,
        });
        let possibles = possibles
            .iter()
            .enumerate()
            .map(|(index, feature)| Preselected {
                feature: feature.clone(),
                checked: self.noticed(index, speed, feature),
                locked: false,
            });
        constants.chain(possibles).collect()
    }

    /// Turns the first hunting/fishing encounter into a wildlife candidate.
    ///
    /// A d100 at or under the encounter weight yields a sighting of the animal;
    /// otherwise only its tracks are there to be found.
    pub fn wildlife_candidate(
        &self,
        mut encounters: impl Iterator<Item = Encounter>,
    ) -> Option<TileFeature> {
        let encounter = encounters.next()?;
        let roll = self.rng.roll_d100(self.key.seed(ENCOUNTER_CONTEXT));
        if roll <= encounter.weight {
            Some(encounter.animal)
        } else {
            Some(TileFeature::tracks_of(&encounter.animal))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, PcgRng};
    use crate::state::{Owner, Point, SettlementKind, TerrainFeature};

    fn key(step: u64) -> RollKey {
        RollKey::new(99, step, Point::new(3, 3))
    }

    fn river() -> TileFeature {
        TileFeature::terrain(FeatureId::Persistent(1), TerrainFeature::River)
    }

    fn hamlet(dc: u8) -> TileFeature {
        TileFeature::settlement(
            FeatureId::Persistent(2),
            Owner::Independent,
            SettlementKind::Village,
            "Brackwater",
            35,
            dc,
        )
    }

    #[test]
    fn constants_survive_any_roll() {
        let rng = FixedRng::always_low();
        let selector = DiscoverySelector::new(&rng, VisibilityModel::default(), key(0));
        let constants = [river()];
        let possibles = [hamlet(30)];

        let discovery = selector.select(&constants, &possibles, Speed::Fast);
        assert_eq!(discovery.constants, constants.to_vec());
        assert!(discovery.possibles.is_empty());
    }

    #[test]
    fn tolerates_empty_and_singleton_input() {
        let rng = FixedRng::always_high();
        let selector = DiscoverySelector::new(&rng, VisibilityModel::default(), key(0));

        assert!(selector.select(&[], &[], Speed::Normal).is_empty());
        let single = selector.select(&[], &[hamlet(10)], Speed::Normal);
        assert_eq!(single.len(), 1);
        assert!(single.contains(FeatureId::Persistent(2)));
    }

    #[test]
    fn never_invents_features() {
        let rng = PcgRng;
        let constants = [river()];
        let possibles = [hamlet(8), hamlet(14).with_id(FeatureId::Persistent(3))];
        for step in 0..200 {
            let selector = DiscoverySelector::new(&rng, VisibilityModel::default(), key(step));
            let discovery = selector.select(&constants, &possibles, Speed::Normal);
            for feature in discovery.iter() {
                assert!(constants.contains(feature) || possibles.contains(feature));
            }
            assert!(discovery.contains(FeatureId::Persistent(1)));
        }
    }

    #[test]
    fn slow_travel_notices_far_more_often_than_fast() {
        let rng = PcgRng;
        let possibles = [hamlet(12)];
        let trials = 2000;
        let mut slow_hits = 0;
        let mut fast_hits = 0;
        for step in 0..trials {
            let selector = DiscoverySelector::new(&rng, VisibilityModel::default(), key(step));
            if !selector.select(&[], &possibles, Speed::Slow).is_empty() {
                slow_hits += 1;
            }
            if !selector.select(&[], &possibles, Speed::Fast).is_empty() {
                fast_hits += 1;
            }
        }

        // Expected rates are 75% and 15%.
        assert!(slow_hits * 100 > trials * 60, "slow: {slow_hits}/{trials}");
        assert!(fast_hits * 100 < trials * 30, "fast: {fast_hits}/{trials}");
    }

    #[test]
    fn preselect_locks_constants_first() {
        let rng = FixedRng::always_low();
        let selector = DiscoverySelector::new(&rng, VisibilityModel::default(), key(0));
        let entries = selector.preselect(&[river()], &[hamlet(18)], Speed::Normal);

        assert_eq!(entries.len(), 2);
        assert!(entries[0].checked && entries[0].locked);
        assert_eq!(entries[0].feature, river());
        assert!(!entries[1].checked && !entries[1].locked);
    }

    #[test]
    fn heavy_encounter_is_sighted_and_light_one_leaves_tracks() {
        let rng = FixedRng::face(50);
        let selector = DiscoverySelector::new(&rng, VisibilityModel::default(), key(0));
        let stag = TileFeature::wildlife(FeatureId::Ephemeral, "red deer", 3, 9);

        let sighted = selector
            .wildlife_candidate(std::iter::once(Encounter::new(80, stag.clone())))
            .unwrap();
        assert_eq!(sighted, stag);

        let tracks = selector
            .wildlife_candidate(std::iter::once(Encounter::new(20, stag.clone())))
            .unwrap();
        assert_eq!(tracks.description(), "tracks of red deer");

        assert_eq!(selector.wildlife_candidate(std::iter::empty()), None);
    }

    #[test]
    fn only_the_first_encounter_is_consumed() {
        let rng = FixedRng::always_low();
        let selector = DiscoverySelector::new(&rng, VisibilityModel::default(), key(0));
        let mut taken = 0;
        let endless = std::iter::repeat_with(|| {
            taken += 1;
            Encounter::new(100, TileFeature::wildlife(FeatureId::Ephemeral, "hare", 1, 5))
        });

        assert!(selector.wildlife_candidate(endless).is_some());
        assert_eq!(taken, 1);
    }
}
