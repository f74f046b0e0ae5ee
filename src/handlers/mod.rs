// src/handlers/mod.rs

pub mod comments;
pub mod index;
pub mod photos;
pub mod social_medias;
pub mod users;
