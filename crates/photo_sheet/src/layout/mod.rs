pub mod geometry;
pub mod positions;
pub mod solver;
