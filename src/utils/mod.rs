//! Various unsorted geometric utilities.

pub use self::aabb::point_cloud_aabb;
pub use self::center::center;
pub use self::cleanup::remove_unused_points;
pub use self::cov::{center_cov, cov};
pub use self::point_cloud_support_point::{
    point_cloud_support_point, point_cloud_support_point_id,
};
pub use self::sorted_pair::SortedPair;

pub mod hashmap;

mod aabb;
mod center;
mod cleanup;
mod cov;
mod point_cloud_support_point;
mod sorted_pair;
