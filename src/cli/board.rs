//! `prio board` - launch the interactive board.

use std::path::PathBuf;

use crate::error::Result;
use crate::store::TaskStore;

/// Options for `prio board`
pub struct BoardOptions {
    pub data_dir: Option<PathBuf>,
}

/// Run `prio board`
pub fn run(opts: BoardOptions) -> Result<()> {
    let (config, storage) = super::open_storage(opts.data_dir)?;
    let store = TaskStore::open(storage);
    crate::ui::board::run(store, config)
}
