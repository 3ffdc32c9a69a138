//! Service methods grouped by backend resource

pub mod auth;
pub mod consultations;
pub mod media;
pub mod pets;
pub mod users;
pub mod vaccines;
