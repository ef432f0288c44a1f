use std::path::PathBuf;

use gavel_core::action;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub dir: Option<PathBuf>,
}

pub fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    action::init_judge_root(&dir)?;
    println!(
        "Initialized judge root in {}",
        dir.to_string_lossy()
    );
    Ok(())
}
