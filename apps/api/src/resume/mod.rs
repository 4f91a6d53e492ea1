// Resume upload: pull plain text out of a PDF so the client can run its own
// analysis against a job description.

pub mod handlers;
pub mod pdf;
