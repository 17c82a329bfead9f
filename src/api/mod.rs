//! REST backend access: the `CampaignApi` seam, its HTTP implementation and
//! the helpers that turn backend responses and failures into domain values
//! and user-facing text.

pub mod auth_errors;
pub mod client;
pub mod errors;
pub mod normalize;
pub mod types;

pub use auth_errors::{auth_error_message, GENERIC_AUTH_MESSAGE};
pub use client::{CampaignApi, HttpCampaignApi};
pub use errors::{error_message, ApiError};
pub use types::{CreatorCampaign, Profile};
