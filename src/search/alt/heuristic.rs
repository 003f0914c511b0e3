use super::landmark_storage::{ActiveLandmarks, LandmarkStorage, WeightDirection, MAX_WEIGHT};
use crate::{
    error::Result,
    graphs::{Distance, Vertex},
    search::DistanceHeuristic,
};

/// ALT lower bound for one search towards a fixed target.
///
/// Built per query from the storage's active landmark selection and thrown
/// away afterwards. Every evaluation reads two table cells per active
/// landmark for the queried vertex; the target-side cells are the cached
/// ones from the selection.
pub struct LandmarkAltHeuristic<'a> {
    storage: &'a LandmarkStorage,
    active: ActiveLandmarks,
    target: Vertex,
}

impl<'a> LandmarkAltHeuristic<'a> {
    pub fn new(
        storage: &'a LandmarkStorage,
        source: Vertex,
        target: Vertex,
        active_landmarks: usize,
    ) -> Result<LandmarkAltHeuristic<'a>> {
        let active = storage.select_active(source, target, active_landmarks, false)?;

        Ok(LandmarkAltHeuristic {
            storage,
            active,
            target,
        })
    }

    pub fn active(&self) -> &ActiveLandmarks {
        &self.active
    }
}

impl DistanceHeuristic for LandmarkAltHeuristic<'_> {
    fn lower_bound(&self, source: Vertex, target: Vertex) -> Distance {
        debug_assert_eq!(
            target, self.target,
            "the active landmark set only bounds distances towards its target"
        );

        let mut bound: Distance = 0;

        for (slot, &landmark_index) in self.active.indices.iter().enumerate() {
            // cells at or above the clamp sentinel carry no usable distance;
            // using them could overestimate, so those terms are skipped
            let from_source = self
                .storage
                .cell(landmark_index, source, WeightDirection::From);
            if from_source < MAX_WEIGHT {
                let forward = self.active.active_froms[slot].saturating_sub(from_source as Distance);
                bound = std::cmp::max(bound, forward);
            }

            // a clamped target-side TO cell underestimates the subtrahend,
            // which would overestimate the bound
            let to_target_clamped = self.active.active_tos[slot] >= MAX_WEIGHT as Distance;
            let to_source = self
                .storage
                .cell(landmark_index, source, WeightDirection::To);
            if to_source < MAX_WEIGHT && !to_target_clamped {
                let backward = (to_source as Distance).saturating_sub(self.active.active_tos[slot]);
                bound = std::cmp::max(bound, backward);
            }
        }

        bound
    }
}
