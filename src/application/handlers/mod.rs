//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod enrichment;
pub mod session;

pub use enrichment::{
    GetMeetingRitualHandler, GetMeetingRitualQuery, IllustrateChapterHandler,
    IllustrateChapterQuery,
};
pub use session::{
    CheckInAtLocationCommand, CheckInAtLocationHandler, CheckInAtLocationResult,
    ChooseStoryOptionCommand, ChooseStoryOptionHandler, ChooseStoryOptionResult,
    GetSessionHandler, GetSessionQuery, NavigateAction, NavigateViewCommand, NavigateViewHandler,
    StartOnboardingCommand, StartOnboardingHandler,
};
