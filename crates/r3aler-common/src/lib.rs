pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{AuthError, ChatError, ConfigError, R3alerError, StorageError, VoiceError};
pub use events::{Event, EventBus};
pub use id::new_correlation_id;
pub use types::{AssistantState, ConversationLog, Message, Sender, Trigger};

pub type Result<T> = std::result::Result<T, R3alerError>;
