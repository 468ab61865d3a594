//! Process lifecycle: shutdown signalling for the server.

mod shutdown;

pub use shutdown::shutdown_signal;
