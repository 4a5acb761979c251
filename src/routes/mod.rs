pub mod dashboard;
pub mod health;
pub mod historic;
pub mod logs;
pub mod report;
