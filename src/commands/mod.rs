// ABOUTME: Command implementations for each CLI subcommand
// ABOUTME: Exports init, create, status, diff, sync, and update-sync-date

pub mod create;
pub mod diff;
pub mod init;
pub mod status;
pub mod sync;
pub mod update_sync_date;

pub use create::create;
pub use diff::diff;
pub use init::init;
pub use status::status;
pub use sync::sync;
pub use update_sync_date::update_sync_date;
