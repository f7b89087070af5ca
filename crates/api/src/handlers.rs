pub mod auth;
pub mod calendar;
pub mod class;
pub mod stream;
pub mod timetable;
