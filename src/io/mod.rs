//! Types and methods for reading the coverage sources and writing output.

pub mod bigwig;
pub mod depth;
pub mod file;
pub mod noodles;
pub mod tsv;

pub use bigwig::BigWigFile;
pub use depth::{DepthFile, DepthRecord, DepthRecords};
pub use file::{InputFile, OutputFile};
pub use tsv::{TsvConfig, COVERAGE_TSV};
