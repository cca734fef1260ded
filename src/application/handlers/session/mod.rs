//! Session command and query handlers.

mod check_in_at_location;
mod choose_story_option;
mod get_session;
mod navigate_view;
mod start_onboarding;

pub use check_in_at_location::{
    CheckInAtLocationCommand, CheckInAtLocationHandler, CheckInAtLocationResult,
};
pub use choose_story_option::{
    ChooseStoryOptionCommand, ChooseStoryOptionHandler, ChooseStoryOptionResult,
};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub(crate) use get_session::load_session;
pub use navigate_view::{NavigateAction, NavigateViewCommand, NavigateViewHandler};
pub use start_onboarding::{StartOnboardingCommand, StartOnboardingHandler};
