//! Fuzzy-C-Means (FCM) and Possibilistic-C-Means (PCM) cluster analysis
//! over fixed sets of 2-dimensional points.

mod c_means_base;
pub mod fuzzy_c_means;
pub mod interface;
pub mod point;
pub mod possibilistic_c_means;
#[cfg(test)]
mod test_utils;
mod utils;

pub use c_means_base::{Initialization, DEFAULT_EPSILON};
pub use fuzzy_c_means::FuzzyCMeans;
pub use interface::CMeansInterface;
pub use point::{Point2D, PointPixel};
pub use possibilistic_c_means::PossibilisticCMeans;
pub use utils::LibData;
