use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use version_resolver::analyzer::CommitAnalyzer;
use version_resolver::boundary::collect_warnings;
use version_resolver::config;
use version_resolver::context::{ContextOverrides, PipelineContext};
use version_resolver::domain::BranchContext;
use version_resolver::git::{Git2Repository, Repository};
use version_resolver::manifest::Manifest;
use version_resolver::output::{self, OutputFormat, GITHUB_OUTPUT_VAR};
use version_resolver::plan::ReleasePlan;
use version_resolver::{
    parse_suggestion, resolve, ui, ResolveRequest, Strategy, VersionDecision,
};

#[derive(clap::Parser, Debug)]
#[command(
    name = "version-resolver",
    version,
    about = "Compute the next semantic version and release channel for a pipeline run"
)]
struct Args {
    #[arg(long, help = "Current version (overrides the manifest)")]
    current_version: Option<String>,

    #[arg(short, long, help = "Project manifest (package.json or pom.xml)")]
    manifest: Option<PathBuf>,

    #[arg(short, long, help = "Versioning strategy: auto, major, minor or patch")]
    strategy: Option<String>,

    #[arg(short, long, help = "Custom prerelease label, overrides branch inference")]
    prerelease: Option<String>,

    #[arg(short, long, help = "Branch name (default: CI environment or git HEAD)")]
    branch: Option<String>,

    #[arg(long, help = "Pipeline run counter (default: GITHUB_RUN_NUMBER)")]
    run_number: Option<u64>,

    #[arg(long, help = "Commit SHA (default: GITHUB_SHA or git HEAD)")]
    commit: Option<String>,

    #[arg(long, help = "Suggested bump from commit analysis: major, minor, patch or none")]
    bump: Option<String>,

    #[arg(long, help = "Derive the bump suggestion from commits since the latest tag")]
    analyze_commits: bool,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    repo: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    format: OutputFormat,

    #[arg(long, help = "Write the manifest and create the tag according to the plan")]
    apply: bool,

    #[arg(long, help = "Preview what --apply would do without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Skip confirmation prompts")]
    yes: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(short, long, help = "Only report errors")]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(&args);
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let default_directive = if args.verbose {
        "version_resolver=debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("loading configuration")?;

    let repo = match Git2Repository::open(&args.repo) {
        Ok(repo) => Some(repo),
        Err(e) => {
            debug!(error = %e, "no git repository available");
            None
        }
    };

    let mut manifest = args
        .manifest
        .as_ref()
        .map(Manifest::load)
        .transpose()
        .context("loading manifest")?;

    let current_version = match (&args.current_version, &manifest) {
        (Some(version), _) => version.clone(),
        (None, Some(manifest)) => manifest.version()?,
        (None, None) => bail!("No current version: pass --current-version or --manifest"),
    };

    let strategy_raw = args
        .strategy
        .clone()
        .unwrap_or_else(|| config.behavior.default_strategy.clone());
    let strategy = Strategy::parse_with(&strategy_raw, config.behavior.strict_strategy)?;

    let analysis = if args.analyze_commits {
        let repo = repo
            .as_ref()
            .context("--analyze-commits requires a git repository")?;
        let analysis = CommitAnalyzer::new(config.conventional_commits.clone())
            .analyze_repository(repo)
            .context("analyzing commit history")?;
        if !args.quiet {
            ui::display_commit_analysis(&analysis);
        }
        Some(analysis)
    } else {
        None
    };

    let explicit_bump = args.bump.as_deref().map(parse_suggestion).transpose()?;
    let suggestion = match explicit_bump {
        Some(bump) => bump,
        None => analysis.as_ref().and_then(|a| a.suggestion),
    };

    let overrides = ContextOverrides {
        branch: args.branch.clone(),
        run_number: args.run_number,
        commit: args.commit.clone(),
    };
    let context = PipelineContext::discover(&overrides, repo.as_ref())?;

    let request = ResolveRequest {
        current_version: current_version.clone(),
        strategy,
        custom_prerelease: args.prerelease.clone(),
        branch_name: context.branch_name.clone(),
        commit_suggested_bump: suggestion,
        run_sequence: context.run_sequence,
        commit_id_prefix: context.commit_id_prefix.clone(),
    };
    let decision = resolve(&request)?;
    let branch = BranchContext::new(&context.branch_name);
    let plan = ReleasePlan::from_decision(&decision, &branch, &config.tags, &config.routing)?;

    info!(
        new_version = %decision.new_version,
        category = %decision.version_category,
        tier = %plan.tier,
        "resolved"
    );

    for warning in collect_warnings(&decision, &plan, &branch.name, analysis.as_ref()) {
        warn!(%warning, "boundary warning");
        if !args.quiet {
            ui::display_boundary_warning(&warning);
        }
    }

    emit(args.format, &current_version, &decision, &plan)?;

    if args.apply || args.dry_run {
        apply_plan(args, &decision, &plan, manifest.as_mut(), repo.as_ref())?;
    }

    Ok(())
}

fn emit(
    format: OutputFormat,
    current_version: &str,
    decision: &VersionDecision,
    plan: &ReleasePlan,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", ui::format_decision(current_version, decision, plan)),
        OutputFormat::Json => println!("{}", output::to_json(decision, plan)?),
        OutputFormat::Github => {
            let output_file = env::var_os(GITHUB_OUTPUT_VAR).map(PathBuf::from);
            let used_file = output::write_github_outputs(
                decision,
                plan,
                output_file.as_deref(),
                &mut io::stdout(),
            )
            .context("writing step outputs")?;
            if used_file {
                debug!("appended outputs to ${}", GITHUB_OUTPUT_VAR);
            }
        }
    }
    Ok(())
}

fn apply_plan(
    args: &Args,
    decision: &VersionDecision,
    plan: &ReleasePlan,
    manifest: Option<&mut Manifest>,
    repo: Option<&Git2Repository>,
) -> Result<()> {
    if args.dry_run {
        ui::display_status("Dry run:");
        if plan.write_manifest && manifest.is_some() {
            ui::display_success(&format!(
                "  Would write version {} to the manifest",
                decision.new_version
            ));
        }
        if plan.create_tag {
            ui::display_success(&format!("  Would create tag {}", plan.tag_name));
        }
        if let Some(release) = &plan.release {
            ui::display_success(&format!(
                "  Would request release {} (prerelease: {})",
                release.tag_name, release.prerelease
            ));
        }
        return Ok(());
    }

    if !args.yes
        && ui::is_interactive()
        && !ui::confirm_action(&format!("Apply version {}?", decision.new_version))?
    {
        ui::display_status("Operation cancelled by user.");
        return Ok(());
    }

    if plan.write_manifest {
        if let Some(manifest) = manifest {
            manifest.set_version(&decision.new_version)?;
            manifest.save().context("writing manifest")?;
            ui::display_success(&format!("Wrote version {}", decision.new_version));
        }
    }

    if plan.create_tag {
        let repo = repo.context("Creating a tag requires a git repository")?;
        if repo.tag_exists(&plan.tag_name)? {
            ui::display_status(&format!(
                "Tag {} already exists, leaving it in place",
                plan.tag_name
            ));
        } else {
            repo.create_tag(&plan.tag_name)
                .with_context(|| format!("creating tag '{}'", plan.tag_name))?;
            ui::display_success(&format!("Created tag: {}", plan.tag_name));
        }
    }

    if let Some(release) = &plan.release {
        info!(
            tag = %release.tag_name,
            prerelease = release.prerelease,
            draft = release.draft,
            "release requested; creation is left to the pipeline"
        );
    }

    Ok(())
}
