//! Role instruction text for the triage agents

pub mod agent;
