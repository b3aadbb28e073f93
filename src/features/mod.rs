pub mod derive;
pub mod select;

pub use derive::{derive, FeatureVector, EPSILON};
pub use select::{
    is_categorical, select, ModelColumn, ModelInput, ModelValue, CATEGORICAL_COLUMNS, MODEL_COLUMNS,
};
