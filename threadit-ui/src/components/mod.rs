mod avatar;
mod error_display;
mod loading_spinner;
mod post_box;
mod post_card;

pub use avatar::Avatar;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use post_box::{PostBox, SubmitPostFn};
pub use post_card::{AddVoteFn, PostCard};
