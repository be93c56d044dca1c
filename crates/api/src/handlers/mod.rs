pub mod activity;
pub mod dashboard;
pub mod session;
