pub mod evidence;
pub mod init;
pub mod list;
pub mod mechanism;
pub mod seed;
pub mod set_status;
pub mod show;
pub mod status;

use anyhow::Result;
use colored::{ColoredString, Colorize};

use crate::models::ActivityStatus;
use crate::store::DataDir;

/// Open the data directory in the current working directory.
pub(crate) fn open_data_dir() -> Result<DataDir> {
    let cwd = std::env::current_dir()?;
    let dir = DataDir::new(cwd);
    dir.load()?;
    Ok(dir)
}

/// Status coloring shared by the list/show/status views.
pub(crate) fn paint_status(status: ActivityStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        ActivityStatus::Pending => label.dimmed(),
        ActivityStatus::InProgress => label.blue(),
        ActivityStatus::Blocked => label.red(),
        ActivityStatus::Done => label.green(),
    }
}
