pub mod feature_table;

pub use feature_table::{read_feature_table, score_rows, write_predictions, FeatureRow};
