//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers move a session between screens; query handlers read it
//! or fetch screen-scoped enrichments.

pub mod handlers;
mod screen_cache;

pub use handlers::{
    CheckInAtLocationCommand, CheckInAtLocationHandler, CheckInAtLocationResult,
    ChooseStoryOptionCommand, ChooseStoryOptionHandler, ChooseStoryOptionResult,
    GetMeetingRitualHandler, GetMeetingRitualQuery, GetSessionHandler, GetSessionQuery,
    IllustrateChapterHandler, IllustrateChapterQuery, NavigateAction, NavigateViewCommand,
    NavigateViewHandler, StartOnboardingCommand, StartOnboardingHandler,
};
pub use screen_cache::{ScreenCache, ScreenTaskError};
