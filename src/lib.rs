pub mod analyzer;
pub mod config;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod record;
pub mod scanner;
pub mod store;

pub use analyzer::{ProjectAnalyzer, ProjectContext};
pub use config::ScanConfig;
pub use error::{Result, ScanError};
pub use llm::{ChatClient, ChatClientConfig, ChatMessage, ChatModel, ChatReply};
pub use orchestrator::{list_project_dirs, ProjectScanner};
pub use record::{ProjectOutcome, ProjectRecord, ProjectSummary, MISSING_DESCRIPTION};
pub use scanner::{
    read_description, EntryLister, FsLister, IgnorePatterns, ProjectDescription, ProjectTree,
    ScanProgress, TreeEntry,
};
pub use store::JsonStore;
