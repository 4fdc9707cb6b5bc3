//! Conversation entities: agent roles, turns, and the transcript

pub mod role;
pub mod transcript;
