//! Data models for the MentorHub mentoring platform.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod contact;
mod file;
mod project;
mod review;
mod user;

pub use contact::*;
pub use file::*;
pub use project::*;
pub use review::*;
pub use user::*;
