pub mod filter;
pub mod watch;
