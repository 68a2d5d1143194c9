pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod files;
pub mod highlight;
pub mod preview;
pub mod reply;
pub mod router;
pub mod state;
pub mod template;

// Re-export main types for convenience
pub use classifier::{classify, ArtifactFlow, Classifier, GeneratedArtifact, Rule, RULES};
pub use config::Config;
pub use error::{Jv3Error, Result};
pub use export::{ClipboardSink, SystemClipboard};
pub use files::{FileKind, FileNode, FileTree, NodeType, TreeRow};
pub use preview::{DocumentOpener, Preview, SystemOpener};
pub use reply::{PendingReply, Reply, ReplyScheduler};
pub use router::{ActiveView, Direction, ViewEvent, ViewState};
pub use state::{ChatMessage, ChatRole, ConversationLog};
pub use template::TemplateId;
