pub mod ack;
pub mod common;
pub mod completions;
pub mod list;
pub mod send;
pub mod watch;
