pub mod event_log;
pub mod note;
pub mod video;

pub use event_log::{EventLogEntry, EventType};
pub use note::Note;
pub use video::VideoDetails;
