pub mod form;
pub mod health;
pub mod media;
pub mod post;
