pub mod images;
pub mod movies;
