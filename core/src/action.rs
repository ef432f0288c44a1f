use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context as _};
use colored::Colorize;

use crate::config::Config;
use crate::error::EvaluateError;
use crate::judging::{
    self, comparator, CompileStatus, Compiler, Execution, Scorer, Supervisor, TestPair, TestReport,
    Verdict,
};
use crate::scratch::{RunArea, ScratchHome};
use crate::store::{
    EvaluationStatus, ProblemRecord, RecordStore, SubmissionSource, TestcaseProvider,
};
use crate::style;

/// Verdict text recorded when the toolchain rejects the submission.
pub const COMPILE_FAILED_VERDICT: &str = "Compilation failed!";

/// Outcome of a completed evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Judgement {
    /// The toolchain rejected the submission; no test case was executed.
    CompileFailed,
    /// Every test case was resolved; `score` is the raw accumulated
    /// percentage (see `Scorer`).
    Scored {
        score: f64,
        tests: Vec<TestReport>,
    },
}

impl Judgement {
    /// Text persisted in the Evaluation record's verdict field.
    pub fn verdict_text(&self) -> String {
        match self {
            Self::CompileFailed => COMPILE_FAILED_VERDICT.to_owned(),
            Self::Scored { score, .. } => score.to_string(),
        }
    }
}

/// Drives one evaluation run end to end:
/// load records, mark Evaluating, compile, run every test case in pairing
/// order, score, mark Completed. The run's scratch area is created up front
/// and removed on every exit path.
pub async fn evaluate(
    records: &dyn RecordStore,
    submissions: &dyn SubmissionSource,
    testcases: &dyn TestcaseProvider,
    cfg: &Config,
    evaluation_id: &str,
) -> Result<Judgement, EvaluateError> {
    let mut evaluation = records
        .get_evaluation(evaluation_id)
        .await
        .context("Failed to load evaluation record")?
        .ok_or_else(|| EvaluateError::UnknownEvaluation(evaluation_id.to_owned()))?;

    let problem = records
        .get_problem(&evaluation.problem_id)
        .await
        .context("Failed to load problem record")?
        .ok_or_else(|| EvaluateError::DanglingProblemReference {
            evaluation_id: evaluation_id.to_owned(),
            problem_id: evaluation.problem_id.clone(),
        })?;

    evaluation.status = EvaluationStatus::Evaluating;
    records
        .put_evaluation(&evaluation)
        .await
        .context("Failed to persist evaluation status")?;

    let scratch = ScratchHome::new(&cfg.storage.scratch_dir);
    let area = scratch.create_run_area(evaluation_id)?;

    let judgement = run_in_area(&area, submissions, testcases, cfg, &problem).await;

    if let Err(e) = area.cleanup() {
        log::warn!(
            "Failed to clean up run area of evaluation '{}': {:#}",
            evaluation_id,
            e,
        );
    }
    let judgement = judgement?;

    evaluation.verdict = judgement.verdict_text();
    evaluation.status = EvaluationStatus::Completed;
    records
        .put_evaluation(&evaluation)
        .await
        .context("Failed to persist evaluation result")?;

    log::info!(
        "Evaluation '{}' completed: verdict='{}'",
        evaluation_id,
        evaluation.verdict,
    );
    Ok(judgement)
}

async fn run_in_area(
    area: &RunArea,
    submissions: &dyn SubmissionSource,
    testcases: &dyn TestcaseProvider,
    cfg: &Config,
    problem: &ProblemRecord,
) -> Result<Judgement, EvaluateError> {
    let (input_names, output_names) = tokio::try_join!(
        testcases.list_input_names(&problem.id),
        testcases.list_output_names(&problem.id),
    )
    .context("Failed to list testcase blobs")?;
    let pairs = judging::pair_testcases(input_names, output_names);

    let source = submissions
        .fetch_source(area.evaluation_id())
        .await
        .context("Failed to fetch submission source")?;
    fsutil::write(area.source_file(), &source)?;

    let compiler = Compiler::new(cfg.toolchain.clone());
    let executable = area.executable_file();
    match compiler.compile(&area.source_file(), &executable).await? {
        CompileStatus::Built => (),
        CompileStatus::Failed { .. } => return Ok(Judgement::CompileFailed),
    }

    let supervisor = Supervisor::new(cfg.judge.time_limit());
    let mut scorer = Scorer::new(pairs.len());
    let mut reports = Vec::with_capacity(pairs.len());

    // Strictly sequential: each test case is fully resolved before the next.
    for pair in &pairs {
        let report =
            run_single_test(area, testcases, &supervisor, &executable, problem, pair).await?;
        scorer.record(report.verdict);
        reports.push(report);
    }

    Ok(Judgement::Scored {
        score: scorer.total(),
        tests: reports,
    })
}

async fn run_single_test(
    area: &RunArea,
    testcases: &dyn TestcaseProvider,
    supervisor: &Supervisor,
    executable: &Path,
    problem: &ProblemRecord,
    pair: &TestPair,
) -> Result<TestReport, EvaluateError> {
    let slot = area.test_slot(pair.ord, &problem.file_prefix);
    let (input, expected) = tokio::try_join!(
        testcases.fetch_blob(&problem.id, &pair.input),
        testcases.fetch_blob(&problem.id, &pair.expected),
    )
    .context("Failed to fetch testcase blob")?;
    fsutil::write_with_mkdir(&slot.input, &input)?;
    fsutil::write(&slot.expected, &expected)?;

    let (verdict, execution_time) = match supervisor.run(executable, &slot.dir).await? {
        Execution::TimedOut => (Verdict::TimeExceeded, supervisor.time_limit()),
        Execution::Completed {
            exit_status,
            elapsed,
        } => {
            if !exit_status.success() {
                log::debug!("case{}: submission exited with {}", pair.ord, exit_status);
            }
            let verdict = comparator::compare(&slot.expected, &slot.actual).await?;
            (verdict, elapsed)
        }
    };

    Ok(TestReport {
        ord: pair.ord,
        verdict,
        execution_time,
    })
}

/// Seed `dir` as a judge root with the example config.
pub fn init_judge_root(dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    if let Ok(config_filepath) = Config::find_file_in_ancestors(dir) {
        bail!(
            "Already being a judge root.\nIf it's intentional, remove {:?} and then try again.",
            config_filepath,
        );
    }

    let toml = Config::example_toml();
    fsutil::write_with_mkdir(dir.join(Config::FILENAME), &toml)?;
    Ok(())
}

pub fn print_judgement_report(judgement: &Judgement) {
    match judgement {
        Judgement::CompileFailed => {
            println!("{}", COMPILE_FAILED_VERDICT.bright_red().bold());
        }
        Judgement::Scored { score, tests } => {
            for t in tests {
                println!(
                    "case{} ... {} [{}ms]",
                    t.ord,
                    style::verdict_badge(t.verdict),
                    t.execution_time.as_millis(),
                );
            }
            print_score_summary(*score, tests);
        }
    }
}

fn print_score_summary(score: f64, tests: &[TestReport]) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    let count: HashMap<Verdict, usize> = tests.iter().fold(HashMap::new(), |mut count, t| {
        *count.entry(t.verdict).or_default() += 1;
        count
    });

    let num_total = tests.len();
    let num_correct = *count.get(&Verdict::Correct).unwrap_or(&0);

    if num_correct == num_total {
        print!("{}", format!("Score: {} ({}/{} correct)", score, num_correct, num_total).green());
    } else {
        let detail = count
            .iter()
            .filter(|(&verdict, _)| verdict != Verdict::Correct)
            .map(|(&verdict, &cnt)| {
                format!(
                    "{}{}{}",
                    style::verdict_badge(verdict),
                    "x".dimmed(),
                    cnt.to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!(
            "{} ({})",
            format!("Score: {} ({}/{} correct)", score, num_correct, num_total).bright_red(),
            detail,
        );
    }

    println!(" {}", bar);
}
