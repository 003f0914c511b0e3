use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde_json::json;
use tracing::{debug, info};

use super::selection::select_landmarks;
use crate::{
    error::{Error, Result},
    graphs::{reversible_graph::ReversibleGraph, Distance, DistanceWeighting, EdgeWeighting, Graph, Vertex, WeightedEdge},
    search::dijkstra::dijkstra_one_to_all,
    storage::{DataAccess, Directory},
    utility::get_progressbar,
};

/// Unsigned 16 bit cell sentinel for an unreachable landmark/vertex pair.
pub const INFINITY: u16 = u16::MAX;
/// Weights too large for a cell clamp to this instead of wrapping, which
/// would alias a huge distance to a small one and break admissibility.
pub const MAX_WEIGHT: u16 = INFINITY - 1;

const FROM_OFFSET: usize = 0;
const TO_OFFSET: usize = 2;

/// The distance bound used to reason about how much weight must fit into a
/// cell, roughly the diameter of a continental road network in meters.
const REPRESENTABLE_DISTANCE: Distance = 4_000_000;

/// Per-query choice of the landmarks that bound a source/target pair best,
/// with their distances to the target cached for O(1) heuristic lookups.
#[derive(Debug, Clone)]
pub struct ActiveLandmarks {
    pub indices: Vec<usize>,
    pub active_froms: Vec<Distance>,
    pub active_tos: Vec<Distance>,
}

/// Direction of a precomputed weight: from the landmark to a vertex, or from
/// a vertex to the landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightDirection {
    From,
    To,
}

impl WeightDirection {
    fn offset(self) -> usize {
        match self {
            WeightDirection::From => FROM_OFFSET,
            WeightDirection::To => TO_OFFSET,
        }
    }
}

/// Quantized two-directional landmark distance table.
///
/// Conceptually a `[vertex][landmark][from|to]` matrix of 16 bit cells over a
/// byte store, followed by a trailer of the landmark vertex ids. Once
/// `create_landmarks` or `load_existing` has run the table never changes
/// again, so any number of concurrent searches may read it without locking.
pub struct LandmarkStorage {
    da: DataAccess,
    landmark_ids: Vec<Vertex>,
    landmark_count: usize,
    number_of_vertices: u32,
    /// bytes per vertex: two cells of two bytes per landmark
    row_length: usize,
    /// distance units per storage unit of a cell
    factor: f64,
    weighting: Box<dyn EdgeWeighting>,
    selection_weighting: Box<dyn EdgeWeighting>,
    initialized: bool,
}

impl LandmarkStorage {
    pub fn new(
        directory: &Directory,
        number_of_vertices: u32,
        landmark_count: usize,
        weighting: Box<dyn EdgeWeighting>,
    ) -> LandmarkStorage {
        let da = directory.find(&format!("landmarks_{}", weighting.name()));

        LandmarkStorage {
            da,
            landmark_ids: Vec::new(),
            landmark_count,
            number_of_vertices,
            row_length: landmark_count * 4,
            factor: 1.0,
            weighting,
            // plain distance avoids the geographic bias cost features such
            // as ferries would give the farthest-point search
            selection_weighting: Box::new(DistanceWeighting),
            initialized: false,
        }
    }

    pub fn with_factor(mut self, factor: f64) -> LandmarkStorage {
        self.factor = factor;
        self
    }

    pub fn set_selection_weighting(&mut self, weighting: Box<dyn EdgeWeighting>) {
        self.selection_weighting = weighting;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_empty(&self) -> bool {
        self.landmark_count == 0
    }

    pub fn landmark_count(&self) -> usize {
        self.landmark_count
    }

    /// The vertex ids of the landmarks, in selection order. Empty until
    /// initialized.
    pub fn landmarks(&self) -> &[Vertex] {
        &self.landmark_ids
    }

    pub fn factor(&self) -> Result<f64> {
        if !self.initialized {
            return Err(Error::InvalidState(
                "cannot return factor in uninitialized state".to_string(),
            ));
        }

        Ok(self.factor)
    }

    /// Selects the landmarks and computes the weights to and from them. One
    /// shot; calling it on an initialized storage is an error.
    pub fn create_landmarks<G: Graph + Default>(
        &mut self,
        graph: &ReversibleGraph<G>,
    ) -> Result<()> {
        if self.initialized {
            return Err(Error::InvalidState(
                "initialize the landmark storage once".to_string(),
            ));
        }
        if graph.number_of_vertices() != self.number_of_vertices {
            return Err(Error::InvalidArgument(format!(
                "graph has {} vertices but the storage was sized for {}",
                graph.number_of_vertices(),
                self.number_of_vertices
            )));
        }

        let max_bytes = self.number_of_vertices as usize * self.row_length;
        self.da.create(2000);
        self.da.ensure_capacity(max_bytes);

        // every cell starts at the clamp sentinel so vertices no tree ever
        // reaches stay distinguishable from zero-weight ones
        for pointer in (0..max_bytes).step_by(2) {
            self.da.set_u16(pointer, MAX_WEIGHT);
        }

        self.landmark_ids =
            select_landmarks(graph, self.selection_weighting.as_ref(), self.landmark_count)?;

        debug!(
            weight_bound = self.weighting.min_weight_for_distance(REPRESENTABLE_DISTANCE),
            "smallest weight a maximal-distance path can have"
        );

        // landmark columns are disjoint, so the trees can run in parallel
        // and only the writes stay sequential
        let weighting = self.weighting.as_ref();
        let trees: Vec<_> = self
            .landmark_ids
            .par_iter()
            .progress_with(get_progressbar(
                "Computing landmark weights",
                self.landmark_count as u64,
            ))
            .map(|&landmark| {
                let forward = dijkstra_one_to_all(graph.out_graph(), weighting, false, landmark);
                let backward = dijkstra_one_to_all(graph.in_graph(), weighting, true, landmark);
                (forward, backward)
            })
            .collect();

        let log_offset = std::cmp::max(1, self.landmark_count / 4);
        for (landmark_index, (forward, backward)) in trees.iter().enumerate() {
            for vertex in 0..self.number_of_vertices {
                let row = vertex as usize * self.row_length + landmark_index * 4;

                let forward_distance = forward.distances[vertex as usize];
                if forward_distance != Distance::MAX {
                    self.set_weight(row + FROM_OFFSET, forward_distance as f64 / self.factor);
                }

                let backward_distance = backward.distances[vertex as usize];
                if backward_distance != Distance::MAX {
                    self.set_weight(row + TO_OFFSET, backward_distance as f64 / self.factor);
                }
            }

            if landmark_index % log_offset == 0 {
                info!(
                    "creating landmark weights, progress {}%",
                    (100.0 * landmark_index as f64 / self.landmark_count as f64) as u32
                );
            }
        }

        self.da.ensure_capacity(max_bytes + self.landmark_count * 4);
        for (landmark_index, &landmark) in self.landmark_ids.iter().enumerate() {
            self.da.set_u32(max_bytes + landmark_index * 4, landmark);
        }

        self.initialized = true;
        Ok(())
    }

    /// Tries to read a previously flushed table back. `Ok(false)` means
    /// there is no prior data and the caller may build fresh.
    pub fn load_existing(&mut self) -> Result<bool> {
        if self.initialized {
            return Err(Error::InvalidState(
                "cannot load into an already initialized landmark storage".to_string(),
            ));
        }

        if !self.da.load_existing()? {
            return Ok(false);
        }

        let max_bytes = self.number_of_vertices as usize * self.row_length;
        let trailer_end = max_bytes + self.landmark_count * 4;
        if self.da.capacity() < trailer_end {
            return Err(Error::Storage(format!(
                "landmark file holds {} bytes but {} vertices x {} landmarks need {}",
                self.da.capacity(),
                self.number_of_vertices,
                self.landmark_count,
                trailer_end
            )));
        }

        self.landmark_ids = (0..self.landmark_count)
            .map(|landmark_index| self.da.get_u32(max_bytes + landmark_index * 4))
            .collect();
        self.initialized = true;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.da.flush()
    }

    pub fn close(&mut self) {
        self.da.close();
    }

    pub fn is_closed(&self) -> bool {
        self.da.is_closed()
    }

    pub fn capacity(&self) -> usize {
        self.da.capacity()
    }

    /// The weight from the landmark *as index* to the vertex. Erroring on an
    /// infinity cell is deliberate: callers must filter unreachable
    /// landmarks before asking.
    pub fn get_from_weight(&self, landmark_index: usize, vertex: Vertex) -> Result<Distance> {
        self.get_weight(landmark_index, vertex, WeightDirection::From)
    }

    /// The weight from the vertex to the landmark *as index*.
    pub fn get_to_weight(&self, landmark_index: usize, vertex: Vertex) -> Result<Distance> {
        self.get_weight(landmark_index, vertex, WeightDirection::To)
    }

    fn get_weight(
        &self,
        landmark_index: usize,
        vertex: Vertex,
        direction: WeightDirection,
    ) -> Result<Distance> {
        self.check_cell_args(landmark_index, vertex)?;

        let cell = self.cell(landmark_index, vertex, direction);
        if cell == INFINITY {
            return Err(Error::UnreachableWeight {
                landmark: landmark_index,
                vertex,
            });
        }

        Ok(cell as Distance)
    }

    pub fn is_infinity(
        &self,
        landmark_index: usize,
        vertex: Vertex,
        direction: WeightDirection,
    ) -> Result<bool> {
        self.check_cell_args(landmark_index, vertex)?;

        Ok(self.cell(landmark_index, vertex, direction) == INFINITY)
    }

    /// The edge's weight on the same quantized scale the table uses, for
    /// searches that mix table lookups with edge costs.
    pub fn calc_weight(&self, edge: &WeightedEdge, reverse: bool) -> Distance {
        match self.weighting.calc_weight(edge, reverse) {
            Some(weight) => {
                let scaled = weight as f64 / self.factor;
                if scaled >= Distance::MAX as f64 {
                    Distance::MAX
                } else {
                    scaled as Distance
                }
            }
            None => Distance::MAX,
        }
    }

    /// Ranks all landmarks by the triangle-inequality lower bound they give
    /// for the pair and keeps the best `k`, together with their distances to
    /// `to` so the heuristic does not have to read the table per evaluation.
    ///
    /// Landmarks with an infinity cell for either endpoint cannot bound the
    /// pair and are left out of the ranking.
    pub fn select_active(
        &self,
        from: Vertex,
        to: Vertex,
        k: usize,
        reverse: bool,
    ) -> Result<ActiveLandmarks> {
        if !self.initialized {
            return Err(Error::InvalidState(
                "cannot select active landmarks before initialization".to_string(),
            ));
        }
        if from >= self.number_of_vertices || to >= self.number_of_vertices {
            return Err(Error::InvalidArgument(format!(
                "from {} and to {} must be valid vertices of a graph with {} vertices",
                from, to, self.number_of_vertices
            )));
        }

        let mut ranked: Vec<(i64, usize)> = Vec::with_capacity(self.landmark_count);
        for landmark_index in 0..self.landmark_count {
            let from_to = self.cell(landmark_index, to, WeightDirection::From);
            let from_from = self.cell(landmark_index, from, WeightDirection::From);
            let to_from = self.cell(landmark_index, from, WeightDirection::To);
            let to_to = self.cell(landmark_index, to, WeightDirection::To);

            if from_to == INFINITY
                || from_from == INFINITY
                || to_from == INFINITY
                || to_to == INFINITY
            {
                continue;
            }

            let from_delta = from_to as i64 - from_from as i64;
            let to_delta = to_from as i64 - to_to as i64;

            let score = if reverse {
                std::cmp::max(-from_delta, -to_delta)
            } else {
                std::cmp::max(from_delta, to_delta)
            };
            ranked.push((score, landmark_index));
        }

        // stable sort, so equal scores keep landmark order and the choice
        // stays deterministic
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(k);

        let indices = ranked.iter().map(|&(_, index)| index).collect_vec();
        let active_froms = indices
            .iter()
            .map(|&index| self.cell(index, to, WeightDirection::From) as Distance)
            .collect_vec();
        let active_tos = indices
            .iter()
            .map(|&index| self.cell(index, to, WeightDirection::To) as Distance)
            .collect_vec();

        Ok(ActiveLandmarks {
            indices,
            active_froms,
            active_tos,
        })
    }

    /// Landmark positions as a GeoJSON feature collection, mainly for
    /// eyeballing the geographic spread. Coordinates are looked up through
    /// the callback as `(longitude, latitude)`.
    pub fn landmarks_geojson(&self, coordinate: impl Fn(Vertex) -> (f64, f64)) -> String {
        let features = self
            .landmark_ids
            .iter()
            .map(|&landmark| {
                let (longitude, latitude) = coordinate(landmark);
                json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [longitude, latitude] },
                    "properties": { "vertex": landmark }
                })
            })
            .collect_vec();

        json!({ "type": "FeatureCollection", "features": features }).to_string()
    }

    pub(crate) fn cell(
        &self,
        landmark_index: usize,
        vertex: Vertex,
        direction: WeightDirection,
    ) -> u16 {
        let pointer =
            vertex as usize * self.row_length + landmark_index * 4 + direction.offset();
        self.da.get_u16(pointer)
    }

    fn check_cell_args(&self, landmark_index: usize, vertex: Vertex) -> Result<()> {
        if !self.initialized {
            return Err(Error::InvalidState(
                "cannot read weights before initialization".to_string(),
            ));
        }
        if landmark_index >= self.landmark_count {
            return Err(Error::InvalidArgument(format!(
                "landmark index {} out of range for {} landmarks",
                landmark_index, self.landmark_count
            )));
        }
        if vertex >= self.number_of_vertices {
            return Err(Error::InvalidArgument(format!(
                "vertex {} out of range for {} vertices",
                vertex, self.number_of_vertices
            )));
        }

        Ok(())
    }

    fn set_weight(&mut self, pointer: usize, value: f64) {
        self.da.set_u16(pointer, quantize(value));
    }

    #[cfg(test)]
    fn is_infinity_at(&self, pointer: usize) -> bool {
        self.da.get_u16(pointer) == INFINITY
    }
}

/// Compresses an already scaled weight into a cell. Values beyond what a
/// `Distance` can hold, and non-finite ones, become the infinity sentinel;
/// values that fit a `Distance` but not a cell clamp to `MAX_WEIGHT`.
fn quantize(value: f64) -> u16 {
    if !value.is_finite() || value > Distance::MAX as f64 {
        INFINITY
    } else if value >= MAX_WEIGHT as f64 {
        MAX_WEIGHT
    } else {
        value as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{Distance, EdgeWeighting, WeightedEdge};

    fn test_storage() -> LandmarkStorage {
        let mut storage =
            LandmarkStorage::new(&Directory::ram(), 10, 4, Box::new(DistanceWeighting));
        storage.da.create(2000);
        storage
    }

    #[test]
    fn quantize_clamps_instead_of_wrapping() {
        let mut storage = test_storage();

        // 2^16 reaches past the cell range but must not reset to 0
        storage.set_weight(0, 65536.0);
        assert_eq!(MAX_WEIGHT, storage.cell(0, 0, WeightDirection::From));

        storage.set_weight(0, 65535.0);
        assert_eq!(65534, storage.cell(0, 0, WeightDirection::From));

        storage.set_weight(0, 79999.0);
        assert_eq!(65534, storage.cell(0, 0, WeightDirection::From));
    }

    #[test]
    fn quantize_round_trips_small_weights() {
        let mut storage = test_storage();

        for weight in [0u16, 1, 17, 40, 65533] {
            storage.set_weight(0, weight as f64);
            assert_eq!(weight, storage.cell(0, 0, WeightDirection::From));
        }
    }

    #[test]
    fn unrepresentable_weights_become_infinity() {
        let mut storage = test_storage();

        storage.set_weight(0, f64::MAX);
        assert!(storage.is_infinity_at(0));

        storage.set_weight(0, f64::INFINITY);
        assert!(storage.is_infinity_at(0));

        storage.set_weight(0, 79999.0);
        assert!(!storage.is_infinity_at(0));
    }

    #[test]
    fn calc_weight_saturates_for_untraversable_edges() {
        struct UntraversableWeighting;

        impl EdgeWeighting for UntraversableWeighting {
            fn name(&self) -> &str {
                "untraversable"
            }

            fn calc_weight(&self, _edge: &WeightedEdge, _reverse: bool) -> Option<Distance> {
                None
            }
        }

        let storage =
            LandmarkStorage::new(&Directory::ram(), 10, 8, Box::new(UntraversableWeighting));
        let edge = WeightedEdge::new(0, 1, 1);
        assert_eq!(Distance::MAX, storage.calc_weight(&edge, false));
    }

    #[test]
    fn calc_weight_applies_the_factor() {
        let storage = LandmarkStorage::new(&Directory::ram(), 10, 8, Box::new(DistanceWeighting))
            .with_factor(2.0);
        let edge = WeightedEdge::new(0, 1, 41);
        assert_eq!(20, storage.calc_weight(&edge, false));
    }
}
