//! Tabular I/O and dataset preparation.

pub mod records;
pub mod split;

pub use records::{
    create, read_datasets, read_datasets_from, read_entries, read_entries_from, read_model,
    read_model_from, write_datasets, write_entries, write_model, DatasetRecord, EntryRecord,
    ModelRecord,
};
pub use split::{category_counts, split_entries, Partition, SplitReport, UNKNOWN_CATEGORY};

/// Standard file names inside the data directory.
pub mod files {
    pub const DATA: &str = "data.csv";
    pub const TRAIN: &str = "train.csv";
    pub const TEST: &str = "test.csv";
    pub const VALIDATE: &str = "validate.csv";
    pub const MODEL: &str = "model.csv";
    pub const DATASETS: &str = "datasets.csv";
}
