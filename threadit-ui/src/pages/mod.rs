mod community;
mod home;
mod post;

pub use community::CommunityPage;
pub use home::{GetCurrentUserFn, HomePage};
pub use post::{AddCommentFn, PostPage};
