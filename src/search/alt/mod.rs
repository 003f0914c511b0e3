pub mod heuristic;
pub mod landmark_storage;
pub mod selection;
