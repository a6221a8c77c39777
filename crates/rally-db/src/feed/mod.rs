//! Change feed over LISTEN/NOTIFY

pub mod change_feed;

pub use change_feed::{ChangeFeed, FeedConfig, FeedError, FeedResult};
