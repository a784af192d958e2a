// Snapshot loading: the seam between raw files and the pipeline.

pub mod file;
pub mod traits;

pub use file::FileSource;
pub use traits::SnapshotSource;
