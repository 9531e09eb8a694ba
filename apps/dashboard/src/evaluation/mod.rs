// Evaluation core: turns free-text agent evaluations into structured records.
// Everything here is synchronous, pure and infallible; malformed input
// degrades to empty sections, `Unknown` decisions and default scores.

pub mod decision;
pub mod grammar;
pub mod parser;
pub mod profile;
pub mod radar;
pub mod record;
pub mod score;
