pub mod artists;
pub mod auth;
pub mod comments;
pub mod genres;
pub mod health;
pub mod posts;
pub mod users;
