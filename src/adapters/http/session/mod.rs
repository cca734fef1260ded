//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChapterResponse, CheckInResponse, ChooseOptionRequest, ErrorResponse, IcebreakerResponse,
    LocationResponse, MatchResponse, ProfileResponse, SessionResponse, StartSessionRequest,
    TraitsResponse,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
