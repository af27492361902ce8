pub mod exploration;
pub mod input;
pub mod planner;
pub mod point;
pub mod strategy;
pub mod targeting;
pub mod tuning;
pub mod world;

pub use exploration::*;
pub use input::*;
pub use planner::*;
pub use point::*;
pub use strategy::*;
pub use targeting::*;
pub use tuning::*;
pub use world::*;
