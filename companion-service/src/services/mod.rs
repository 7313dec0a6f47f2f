pub mod database;
pub mod events;
pub mod memory;
pub mod metrics;
pub mod notes;
pub mod providers;
pub mod suggestions;
pub mod youtube;

pub use database::CompanionDb;
pub use events::EventLog;
pub use memory::{InMemoryEventLog, InMemoryNoteStore};
pub use metrics::{get_metrics, init_metrics};
pub use notes::{NoteQuery, NoteStore};
pub use suggestions::TitleSuggester;
pub use youtube::{PlatformError, VideoPlatform, YouTubeClient};
