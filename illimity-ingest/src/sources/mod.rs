pub mod eml;
pub mod files;
pub mod stdin;

pub use files::{FileSource, collect_notification_files, read_notification};
pub use stdin::StdinSource;
