//! CLI command implementations.

mod ask;
mod config;
mod delete;
mod doctor;
mod init;
mod link;
mod list;
mod rename;
mod show;
mod summarize;

pub use ask::run_ask;
pub use config::run_config;
pub use delete::run_delete;
pub use doctor::run_doctor;
pub use init::run_init;
pub use link::run_link;
pub use list::run_list;
pub use rename::run_rename;
pub use show::run_show;
pub use summarize::run_summarize;
