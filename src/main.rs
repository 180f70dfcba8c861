use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use verbump::config::{self, Config};
use verbump::domain::{BumpKind, Module, TagTemplate};
use verbump::executor::{ExecutorOptions, MultiModuleExecutor};
use verbump::hooks::HookExecutor;
use verbump::pipeline::{BumpPipeline, PipelineOptions};
use verbump::plugins::audit::FileAuditLog;
use verbump::plugins::changelog::GitChangelogGenerator;
use verbump::plugins::deps::FileDependencyChecker;
use verbump::plugins::git_tags::GitTagManager;
use verbump::plugins::policy::PolicyValidator;
use verbump::plugins::worktree_gate::CleanWorktreeGate;
use verbump::plugins::PluginRegistry;
use verbump::ui;
use verbump::version_file;
use verbump::workspace::{
    self, DetectorArgs, ExecutionContext, ExecutionMode, ModuleFilter, WorkspaceKind,
};

#[derive(clap::Parser)]
#[command(
    name = "verbump",
    about = "Bump semantic version files across one or many modules"
)]
struct Args {
    #[arg(
        value_name = "BUMP",
        default_value = "auto",
        help = "Bump kind: patch, minor, major, auto, release, or pre"
    )]
    bump: String,

    #[arg(long, help = "Pre-release label for 'pre' bumps (e.g. rc, beta)")]
    pre_label: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Explicit version file path (single-module mode)")]
    path: Option<PathBuf>,

    #[arg(long, help = "Operate on every discovered module")]
    all: bool,

    #[arg(short, long, help = "Module name, or comma-separated names")]
    module: Option<String>,

    #[arg(long, help = "Glob pattern matched against module directory, name, or path")]
    pattern: Option<String>,

    #[arg(long, help = "Run module pipelines concurrently")]
    parallel: bool,

    #[arg(long, help = "Bound on concurrent module pipelines")]
    jobs: Option<usize>,

    #[arg(long, help = "Keep going after a module fails")]
    continue_on_error: bool,

    #[arg(long, help = "Skip pre-release hooks")]
    no_hooks: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.version {
        println!("verbump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let bump_kind = match parse_bump_kind(&args.bump, args.pre_label.as_deref()) {
        Some(kind) => kind,
        None => {
            ui::display_error(&format!(
                "Unknown bump kind '{}' (expected patch, minor, major, auto, release, or pre)",
                args.bump
            ));
            std::process::exit(2);
        }
    };

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let root = std::env::current_dir()?;

    // Classify the invocation and produce the module list to operate on
    let detector_args = DetectorArgs {
        path_override: args.path.clone(),
        select_all: args.all,
        module: args.module.clone(),
        pattern: args.pattern.clone(),
    };

    let context = match workspace::detect_workspace(&root, &config, &detector_args) {
        Ok(WorkspaceKind::SingleModule(path)) => ExecutionContext::single(path),
        Ok(WorkspaceKind::NoModules(path)) => {
            if !path.exists() {
                ui::display_error(&format!(
                    "No version file found at '{}' and discovery found no modules",
                    path.display()
                ));
                std::process::exit(1);
            }
            ExecutionContext::single(path)
        }
        Ok(WorkspaceKind::MultiModule(discovered)) => {
            let filter = build_filter(&args);
            let interactive = ui::is_interactive() && !args.all && !args.force;
            match workspace::select_modules(
                discovered,
                &filter,
                &ui::PromptSelector::new(),
                interactive,
            ) {
                Ok(selected) => ExecutionContext::multi(selected, filter),
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // The mode decides which context fields count; the rest is incidental
    let modules = match (context.mode, &context.path) {
        (ExecutionMode::SingleModule, Some(path)) => vec![single_module(&root, path.clone())?],
        (ExecutionMode::SingleModule, None) => {
            ui::display_error("Single-module mode without a version file path");
            std::process::exit(1);
        }
        (ExecutionMode::MultiModule, _) => context.modules.clone(),
    };

    if context.mode == ExecutionMode::MultiModule && modules.len() > 1 {
        ui::display_modules(&modules);
        ui::display_status(&format!(
            "Applying {} bump to {} modules{}",
            bump_kind,
            modules.len(),
            if args.dry_run { " (dry run)" } else { "" }
        ));

        if !args.force && !args.dry_run && ui::is_interactive() {
            match ui::confirm_action("Proceed?") {
                Ok(true) => {}
                Ok(false) => {
                    println!("Operation cancelled by user.");
                    return Ok(());
                }
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }
    }

    let registry = match build_registry(&config, &root) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let pipeline_options = PipelineOptions {
        tag_template: TagTemplate::new(config.tags.template.clone()),
        push_remote: config.tags.push_remote.clone(),
        hooks: config.hooks.pre_release.clone(),
        skip_hooks: args.no_hooks,
        dry_run: args.dry_run,
    };
    let hook_executor =
        HookExecutor::with_timeout(std::time::Duration::from_secs(config.hooks.timeout_secs));
    let pipeline = Arc::new(BumpPipeline::new(registry, hook_executor, pipeline_options));

    let executor_options = ExecutorOptions {
        parallel: args.parallel || config.executor.parallel,
        max_parallel: args.jobs.unwrap_or(config.executor.max_parallel),
        continue_on_error: args.continue_on_error || config.executor.continue_on_error,
    };
    let executor = MultiModuleExecutor::new(pipeline, executor_options);

    let report = executor.run(modules, bump_kind).await;

    if args.dry_run {
        for result in &report.results {
            match (&result.new_version, &result.error) {
                (Some(version), _) => ui::display_proposed_bump(
                    &result.module.label(),
                    &result.module.current_version,
                    &version.to_string(),
                ),
                (None, error) => ui::display_error(&format!(
                    "{}: {}",
                    result.module.label(),
                    error.as_deref().unwrap_or("unknown error")
                )),
            }
        }
    } else {
        ui::display_report(&report);
    }

    if !report.all_succeeded() {
        std::process::exit(1);
    }

    Ok(())
}

fn parse_bump_kind(bump: &str, pre_label: Option<&str>) -> Option<BumpKind> {
    match bump {
        "patch" => Some(BumpKind::Patch),
        "minor" => Some(BumpKind::Minor),
        "major" => Some(BumpKind::Major),
        "auto" => Some(BumpKind::Auto),
        "release" => Some(BumpKind::Release),
        "pre" => Some(BumpKind::Pre(pre_label.map(String::from))),
        _ => None,
    }
}

fn build_filter(args: &Args) -> ModuleFilter {
    if let Some(module) = &args.module {
        workspace::filter_from_names(module)
    } else if let Some(pattern) = &args.pattern {
        ModuleFilter::Pattern(pattern.clone())
    } else if args.all {
        ModuleFilter::All
    } else {
        ModuleFilter::Interactive
    }
}

fn single_module(root: &std::path::Path, path: PathBuf) -> Result<Module> {
    let raw = version_file::read_raw(&path).map_err(|e| {
        anyhow::anyhow!("Cannot read version file '{}': {}", path.display(), e)
    })?;
    Ok(Module::new(root, path, raw))
}

/// Wire up each plugin capability that the configuration enables
fn build_registry(config: &Config, root: &std::path::Path) -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::new();

    if config.tags.enabled {
        let tags = GitTagManager::discover(root)
            .map_err(|e| anyhow::anyhow!("Tag manager unavailable: {}", e))?;
        registry.set_tag_manager(Arc::new(tags), true);
    }

    if config.gate.enabled && config.gate.require_clean_worktree {
        registry.set_release_gate(Arc::new(CleanWorktreeGate::new()), true);
    }

    if config.policy.enabled {
        registry.set_version_validator(
            Arc::new(PolicyValidator::new(
                config.policy.allowed_labels.clone(),
                config.policy.forbid_downgrade,
            )),
            true,
        );
    }

    if config.dependencies.enabled {
        let files = config
            .dependencies
            .files
            .iter()
            .map(|f| root.join(f))
            .collect();
        registry.set_dependency_checker(
            Arc::new(FileDependencyChecker::new(files, config.dependencies.auto_sync)),
            true,
        );
    }

    if config.changelog.enabled {
        let changelog = GitChangelogGenerator::new(root, root.join(&config.changelog.file))
            .map_err(|e| anyhow::anyhow!("Changelog generator unavailable: {}", e))?;
        registry.set_changelog_generator(Arc::new(changelog), true);
    }

    if config.audit.enabled {
        registry.set_audit_log(Arc::new(FileAuditLog::new(root.join(&config.audit.file))), true);
    }

    Ok(registry)
}
