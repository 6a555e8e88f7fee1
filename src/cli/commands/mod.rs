pub mod browse;
pub mod delete;
pub mod generate;
pub mod list;
pub mod show;
