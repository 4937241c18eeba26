mod assistant;
mod collaborators;
mod intent;

pub use assistant::{Assistant, GENERAL_SYSTEM_PROMPT};
pub use collaborators::{ChatMessage, CompletionService, Role, Service, SyncAdapter, SyncItem};
pub use intent::{Classification, Intent, IntentClassifier, IntentParams, KeywordClassifier};
