//! This file serves as the root for all SeaORM entity modules.
//! The forum's data model lives here: genre boards, registered members,
//! their posts and comments, and the login sessions that authenticate
//! bearer tokens.

pub mod comment;
pub mod genre;
pub mod post;
pub mod session;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::comment::Entity as Comment;
    pub use super::genre::Entity as Genre;
    pub use super::post::Entity as Post;
    pub use super::session::Entity as Session;
    pub use super::user::Entity as User;
}
