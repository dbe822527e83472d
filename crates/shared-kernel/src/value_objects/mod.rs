// crates/shared-kernel/src/value_objects/mod.rs
pub mod feature_count;
pub mod field_name;
pub mod layer_id;

pub use feature_count::FeatureCount;
pub use field_name::FieldName;
pub use layer_id::LayerId;
