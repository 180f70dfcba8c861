//! Multi-module executor
//!
//! Runs the bump pipeline once per selected module, sequentially or under
//! a bounded pool of concurrent tasks. Results always come back in input
//! module order, whatever order tasks finish in. Fail-fast stops
//! scheduling new module runs after the first failure; runs already in
//! flight are allowed to finish and report.

use crate::domain::{BumpKind, Module, SemanticVersion};
use crate::error::{Result, VerbumpError};
use crate::pipeline::{BumpPipeline, PostActionWarning};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Per-module outcome, produced once per attempted module
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub module: Module,
    pub success: bool,
    pub new_version: Option<SemanticVersion>,
    pub error: Option<String>,
    pub warnings: Vec<PostActionWarning>,
}

impl ExecutionResult {
    fn succeeded(module: Module, new_version: SemanticVersion, warnings: Vec<PostActionWarning>) -> Self {
        ExecutionResult {
            module,
            success: true,
            new_version: Some(new_version),
            error: None,
            warnings,
        }
    }

    fn failed(module: Module, error: String) -> Self {
        ExecutionResult {
            module,
            success: false,
            new_version: None,
            error: Some(error),
            warnings: Vec::new(),
        }
    }
}

/// Aggregated outcome of one executor run
#[derive(Debug)]
pub struct ExecutionReport {
    /// Results for attempted modules, in input order
    pub results: Vec<ExecutionResult>,
    /// Modules never attempted because fail-fast stopped scheduling
    pub skipped: usize,
}

impl ExecutionReport {
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }

    /// Collapse the report into a single result: Ok when every attempted
    /// module succeeded, an aggregate error otherwise
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed_count();
        if failed == 0 {
            Ok(self)
        } else {
            Err(VerbumpError::Aggregate { failed })
        }
    }
}

/// Executor settings
#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    /// Run module pipelines concurrently
    pub parallel: bool,
    /// Upper bound on concurrently running pipelines
    pub max_parallel: usize,
    /// Keep attempting remaining modules after a failure
    pub continue_on_error: bool,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        ExecutorOptions {
            parallel: false,
            max_parallel: 4,
            continue_on_error: false,
        }
    }
}

/// Runs the bump pipeline across a set of modules
pub struct MultiModuleExecutor {
    pipeline: Arc<BumpPipeline>,
    options: ExecutorOptions,
}

impl MultiModuleExecutor {
    pub fn new(pipeline: Arc<BumpPipeline>, options: ExecutorOptions) -> Self {
        MultiModuleExecutor { pipeline, options }
    }

    /// Run the pipeline for every module and aggregate the outcomes
    pub async fn run(&self, modules: Vec<Module>, kind: BumpKind) -> ExecutionReport {
        if self.options.parallel && modules.len() > 1 {
            self.run_parallel(modules, kind).await
        } else {
            self.run_sequential(modules, kind).await
        }
    }

    async fn run_sequential(&self, modules: Vec<Module>, kind: BumpKind) -> ExecutionReport {
        let total = modules.len();
        let mut results = Vec::with_capacity(total);

        for module in modules {
            let result = run_one(&self.pipeline, module, &kind).await;
            let failed = !result.success;
            results.push(result);

            if failed && !self.options.continue_on_error {
                break;
            }
        }

        let skipped = total - results.len();
        ExecutionReport { results, skipped }
    }

    async fn run_parallel(&self, modules: Vec<Module>, kind: BumpKind) -> ExecutionReport {
        let total = modules.len();
        let bound = self.options.max_parallel.max(1);
        let semaphore = Arc::new(Semaphore::new(bound));
        // Set once a module fails; under fail-fast, tasks that have not
        // started yet observe it and decline to run
        let failed_flag = Arc::new(AtomicBool::new(false));
        let fail_fast = !self.options.continue_on_error;

        let mut set: JoinSet<(usize, Option<ExecutionResult>)> = JoinSet::new();

        for (index, module) in modules.into_iter().enumerate() {
            let pipeline = Arc::clone(&self.pipeline);
            let kind = kind.clone();
            let semaphore = Arc::clone(&semaphore);
            let failed_flag = Arc::clone(&failed_flag);

            set.spawn(async move {
                // Acquire never fails: the semaphore is not closed
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");

                if fail_fast && failed_flag.load(Ordering::SeqCst) {
                    debug!(module = %module.name, "skipped after earlier failure");
                    return (index, None);
                }

                let result = run_one(&pipeline, module, &kind).await;
                if !result.success {
                    failed_flag.store(true, Ordering::SeqCst);
                }
                (index, Some(result))
            });
        }

        // Completion order is arbitrary; slot results back by input index
        let mut slots: Vec<Option<ExecutionResult>> = (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = result,
                Err(e) => warn!("module task failed to join: {}", e),
            }
        }

        let results: Vec<ExecutionResult> = slots.into_iter().flatten().collect();
        let skipped = total - results.len();
        ExecutionReport { results, skipped }
    }
}

async fn run_one(pipeline: &BumpPipeline, module: Module, kind: &BumpKind) -> ExecutionResult {
    let current = match SemanticVersion::parse(&module.current_version) {
        Ok(version) => version,
        Err(e) => return ExecutionResult::failed(module, e.to_string()),
    };

    let next = match kind.plan(&current) {
        Ok(version) => version,
        Err(e) => return ExecutionResult::failed(module, e.to_string()),
    };

    match pipeline.run(&module, &current, &next, kind.label()).await {
        Ok(outcome) => ExecutionResult::succeeded(module, outcome.new_version, outcome.warnings),
        Err(e) => ExecutionResult::failed(module, e.to_string()),
    }
}
