//! API models for domain entities and request/response payloads

pub mod movie;
pub mod user;

pub use movie::{Movie, MoviePage};
pub use user::{AuthResponse, LoginRequest, SignupRequest, User, UserView};
