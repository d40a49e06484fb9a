pub mod description;
pub mod ignore;
pub mod progress;
pub mod tree;

pub use description::{read_description, ProjectDescription, DESCRIPTION_CANDIDATES};
pub use ignore::{IgnorePatterns, IGNORE_FILENAME};
pub use progress::{ProgressSnapshot, ScanProgress};
pub use tree::{EntryLister, FsLister, ProjectTree, TreeEntry, INDENT};
