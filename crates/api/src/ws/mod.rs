//! Live activity feed over WebSocket.
//!
//! Each socket subscribes to its user's stream on the activity hub and
//! receives every newly recorded activity as a JSON text frame.

mod feed;

pub use feed::activity_feed;
