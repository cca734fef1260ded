//! Screen-scoped enrichment query handlers.

mod get_meeting_ritual;
mod illustrate_chapter;

pub use get_meeting_ritual::{GetMeetingRitualHandler, GetMeetingRitualQuery};
pub use illustrate_chapter::{IllustrateChapterHandler, IllustrateChapterQuery};
