use anyhow::Result;

use crate::model::ClientConfig;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub config: ClientConfig,
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
