pub mod book;
pub mod booked;
pub mod dispatch;
pub mod locations;
pub mod sessions;
