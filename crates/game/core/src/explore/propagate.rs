//! Rules for carrying discoveries from the master map into per-player copies.

use crate::env::{MapError, MapMutator};
use crate::state::{CopyMode, FeatureId, FeatureKind, Mover, Owner, Point, TileFeature};

/// Copy directive for handing `feature` to subordinate maps on behalf of `mover`.
///
/// Owner and magnitude details only survive for features that are neither
/// held by another player, nor settlements, nor carrying population, head-count
/// or quantity data. Independent ownership is not treated as foreign.
pub fn copy_mode(feature: &TileFeature, mover: &Mover) -> CopyMode {
    let foreign = match feature.owner {
        Owner::Player(player) => player != mover.owner,
        Owner::Unknown => true,
        Owner::Independent => false,
    };
    if foreign || feature.is_settlement() || feature.has_magnitude() {
        CopyMode::Zero
    } else {
        CopyMode::Keep
    }
}

/// Makes sure the master holds `feature` at `point` and returns the stored record.
///
/// Tracks only stand in for an animal during one step and are never stored,
/// so they come back as `None`. A sighted animal takes over the id of the herd
/// of the same species already recorded at `point`; only the first sighting
/// there allocates a fresh id.
pub(crate) fn persist(
    master: &mut dyn MapMutator,
    point: Point,
    feature: &TileFeature,
) -> Result<Option<TileFeature>, MapError> {
    if feature.is_tracks() {
        return Ok(None);
    }
    let feature = if feature.id.is_ephemeral() {
        let id = match resident_herd(&*master, point, feature) {
            Some(id) => id,
            None => master.allocate_feature_id(),
        };
        feature.clone().with_id(id)
    } else {
        feature.clone()
    };
    if master.feature(point, feature.id) != Some(&feature) {
        master.upsert_feature(point, &feature, CopyMode::Keep)?;
    }
    Ok(Some(feature))
}

fn resident_herd(
    master: &dyn MapMutator,
    point: Point,
    animal: &TileFeature,
) -> Option<FeatureId> {
    let FeatureKind::Wildlife(sighted) = &animal.kind else {
        return None;
    };
    master
        .features(point)
        .iter()
        .find(|feature| {
            matches!(
                &feature.kind,
                FeatureKind::Wildlife(herd) if !herd.tracks && herd.species == sighted.species
            )
        })
        .map(|feature| feature.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, MapDimensions, MapView};
    use crate::state::{PlayerId, SettlementKind, Terrain, TerrainFeature};

    fn scout() -> Mover {
        Mover::new(FeatureId::Persistent(1), PlayerId(1), "scout", "Ilsa")
    }

    #[test]
    fn plain_terrain_is_kept() {
        let forest = TileFeature::terrain(FeatureId::Persistent(3), TerrainFeature::Forest);
        assert_eq!(copy_mode(&forest, &scout()), CopyMode::Keep);
    }

    #[test]
    fn rival_units_settlements_and_herds_are_zeroed() {
        let mover = scout();
        let rival = TileFeature::unit(
            FeatureId::Persistent(4),
            Owner::Player(PlayerId(2)),
            "Orrin",
            "knight",
            5,
        );
        let own_village = TileFeature::settlement(
            FeatureId::Persistent(5),
            Owner::Player(PlayerId(1)),
            SettlementKind::Village,
            "Hollin",
            80,
            3,
        );
        let herd = TileFeature::wildlife(FeatureId::Persistent(6), "bison", 12, 4);

        assert_eq!(copy_mode(&rival, &mover), CopyMode::Zero);
        assert_eq!(copy_mode(&own_village, &mover), CopyMode::Zero);
        assert_eq!(copy_mode(&herd, &mover), CopyMode::Zero);
    }

    #[test]
    fn own_and_independent_units_are_kept() {
        let mover = scout();
        let own = TileFeature::unit(
            FeatureId::Persistent(7),
            Owner::Player(PlayerId(1)),
            "Bea",
            "scout",
            5,
        );
        let wanderer =
            TileFeature::unit(FeatureId::Persistent(8), Owner::Independent, "Tam", "hermit", 5);

        assert_eq!(copy_mode(&own, &mover), CopyMode::Keep);
        assert_eq!(copy_mode(&wanderer, &mover), CopyMode::Keep);
    }

    #[test]
    fn tracks_never_reach_the_master() {
        let mut master = GridMap::new(MapDimensions::new(2, 2), Terrain::Plains);
        let point = Point::new(0, 1);
        let tracks = TileFeature::tracks_of(&TileFeature::wildlife(
            FeatureId::Ephemeral,
            "wolf",
            3,
            8,
        ));

        assert_eq!(persist(&mut master, point, &tracks), Ok(None));
        assert!(master.features(point).is_empty());
    }

    #[test]
    fn repeated_sightings_refresh_one_herd() {
        let mut master = GridMap::new(MapDimensions::new(2, 2), Terrain::Plains);
        let point = Point::new(1, 0);
        let sighting = |count| TileFeature::wildlife(FeatureId::Ephemeral, "wolf", count, 8);

        let first = persist(&mut master, point, &sighting(3)).unwrap().unwrap();
        let second = persist(&mut master, point, &sighting(5)).unwrap().unwrap();

        assert!(!first.id.is_ephemeral());
        assert_eq!(second.id, first.id);
        assert_eq!(master.features(point), &[second]);
    }

    #[test]
    fn another_species_gets_its_own_record() {
        let mut master = GridMap::new(MapDimensions::new(2, 2), Terrain::Plains);
        let point = Point::new(1, 1);

        let wolves = TileFeature::wildlife(FeatureId::Ephemeral, "wolf", 3, 8);
        let boar = TileFeature::wildlife(FeatureId::Ephemeral, "boar", 2, 6);
        let wolves = persist(&mut master, point, &wolves).unwrap().unwrap();
        let boar = persist(&mut master, point, &boar).unwrap().unwrap();

        assert_ne!(wolves.id, boar.id);
        assert_eq!(master.features(point).len(), 2);
    }
}
