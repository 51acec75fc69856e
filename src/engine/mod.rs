//! Fork-join region engine: domain partitioning plus the map and reduce
//! drivers the tensor pipeline runs on.

pub mod map;
pub mod partition;
pub mod reduce;

pub use self::map::{map_field, RegionBlock, RegionMapper};
pub use self::partition::partition;
pub use self::reduce::{reduce_field, RegionReducer};
