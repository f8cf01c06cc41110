pub mod about;
pub mod dashboard;
pub mod help;
pub mod loading;
pub mod search;
pub mod settings;
