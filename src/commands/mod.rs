pub mod bot;
pub mod champion;
pub mod counter;
pub mod reply;
