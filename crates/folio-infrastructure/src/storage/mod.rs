//! File storage primitives.

mod session_file;

pub use session_file::SessionFile;
