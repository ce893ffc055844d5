pub mod images;
pub mod lmdb_storage;
pub mod memory;
pub mod seed;

pub use images::FsImageStore;
pub use lmdb_storage::LmdbReportStore;
pub use memory::MemoryReportStore;
pub use seed::import_reports;
