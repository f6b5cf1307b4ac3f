pub mod config;
pub mod key;
pub mod model;
pub mod pick;
pub mod prompts;
pub mod providers;
pub mod show;
