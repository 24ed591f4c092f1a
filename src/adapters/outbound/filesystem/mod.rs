/// Filesystem adapters for file I/O operations
mod file_writer;
mod snapshot_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use snapshot_reader::SnapshotReader;
