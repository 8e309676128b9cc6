pub mod clock;
pub mod dir;
pub mod logging;
pub mod score;
pub mod time;
