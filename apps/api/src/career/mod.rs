// Career matching: profile in, five ranked career domains out.
// All model calls go through extraction::StructuredClient.

pub mod handlers;
pub mod matcher;
pub mod models;
pub mod prompts;
