pub mod levels;

pub use levels::{validate_ladder, LodLadder, LodLevel};
