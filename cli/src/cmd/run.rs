use anyhow::Context as _;
use gavel_core::action;
use gavel_core::config::Config;
use gavel_core::error::StatusClass;
use gavel_core::store::fs::{FsRecordStore, FsSubmissionSource, FsTestcaseProvider};

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub evaluation_id: String,
}

pub async fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let cwd = std::env::current_dir().context("Failed to get current dir")?;
    let cfg = Config::from_file_finding_in_ancestors(cwd)?;

    let records = FsRecordStore::new(&cfg.storage.record_dir);
    let submissions = FsSubmissionSource::new(&cfg.storage.submission_dir);
    let testcases = FsTestcaseProvider::new(&cfg.storage.testcase_dir);

    match action::evaluate(&records, &submissions, &testcases, &cfg, &args.evaluation_id).await {
        Ok(judgement) => {
            action::print_judgement_report(&judgement);
            println!("The evaluation was completed successfully!");
            Ok(())
        }
        Err(e) => {
            let class = e.status_class();
            log::error!("Evaluation failed ({}): {:#}", class.status_code(), e);
            std::process::exit(match class {
                StatusClass::ClientError => 1,
                StatusClass::Success | StatusClass::ServerError => 2,
            });
        }
    }
}
