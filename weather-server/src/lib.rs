//! HTTP front end for `weather-core`.
//!
//! Routes:
//! - `POST /api`: look up a city and record it in history
//! - `GET /api/history`: list recorded cities
//! - `DELETE /api/history/{id}`: remove one history entry
//!
//! Anything else is served from the public directory.

pub mod error;
pub mod routes;
pub mod settings;
pub mod state;

pub use routes::{api_router, router};
pub use settings::Settings;
pub use state::AppState;
