//! illimity-ingest: notification sources (.eml exports, plain-text bodies, stdin).

pub mod types;
pub mod sources;

pub use types::{NotificationFile, SourceFormat};
pub use sources::{FileSource, StdinSource, read_notification};
