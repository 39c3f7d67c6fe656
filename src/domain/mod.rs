//! Domain logic - pure data types independent of git and process execution

pub mod bucket;
pub mod log_entry;
pub mod tag_group;

pub use bucket::{Buckets, CommitBucket};
pub use log_entry::{parse_log, parse_ref_decoration, LogEntry};
pub use tag_group::{TagGroup, UNTAGGED};
