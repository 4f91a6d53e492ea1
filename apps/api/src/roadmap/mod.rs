// Day Zero roadmap: one career domain in, a learn / setup / do plan out.

pub mod handlers;
pub mod models;
pub mod planner;
pub mod prompts;
