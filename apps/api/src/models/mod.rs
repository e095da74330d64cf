pub mod notification;
pub mod opportunity;
pub mod project;
pub mod student;
