//! Row-level access to the record tables
//!
//! Functions take `&Connection`; pass a `&Transaction` to batch them.

pub mod image_repo;
pub mod movie_repo;

pub use image_repo::ImageRepo;
pub use movie_repo::MovieRepo;
