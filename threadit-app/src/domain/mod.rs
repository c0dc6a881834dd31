mod comment;
mod community;
mod post;
mod user;
mod vote;

pub use comment::Comment;
pub use community::Community;
pub use post::{Post, PostWithDetails};
pub use user::User;
pub use vote::{ViewerVote, VoteAction, VoteDirection, VoteRecord, VoteSet};
