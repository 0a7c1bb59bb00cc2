pub mod comments;
pub mod index;
pub mod movies;
pub mod top;
