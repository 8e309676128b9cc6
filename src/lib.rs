//! Small terminal tools for keeping track of how you feel. `moodlog` records a mood and sleep
//! score and draws them over a chosen time range, while `moodlog-journal` walks through a short
//! morning, afternoon or evening journal entry. Both keep their data in local SQLite files.

pub mod cli;
pub mod config;
pub mod journal;
pub mod prompt;
pub mod query;
pub mod storage;
pub mod utils;
