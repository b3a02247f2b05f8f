pub mod exact;
pub mod kmeans;

pub use exact::{select_pivots, PivotPolicy};
pub use kmeans::aggregate_pivots_kmeans;
