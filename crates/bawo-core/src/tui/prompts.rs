//! Charm-style CLI prompts using cliclack

use crate::compose::compose;
use crate::config::{
    defaults_path, keys, load_defaults, resolve, validate_project_name, ConfigValue,
    RawConfigSources, DEFAULT_PROJECT_NAME,
};
use crate::features::{Animation, FeatureSet, Framework, StateManagement, FONT_REGISTRY};
use crate::generate::generate;
use crate::guard::{reconcile, Classification, ReconcileReport};
use crate::planner::{DependencyPlan, PackageTable};
use crate::profile::profile_for;
use crate::runtime::{describe_plan, require_node, PackageManager};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Everything the binary hands over
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Flags and preset; interactive answers are filled in here
    pub sources: RawConfigSources,

    /// Where to generate; defaults to `./<project name>`
    pub directory: Option<PathBuf>,

    /// Accept defaults for everything not given on the command line
    pub yes: bool,

    /// Skip the next-steps summary
    pub skip_docs: bool,

    pub skip_install: bool,
}

/// Collect, resolve, plan, reconcile and generate
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("create-bawo-frontend")?;

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut sources = args.sources.clone();

    if let Some(path) = defaults_path(&cwd) {
        sources.defaults = load_defaults(&path)?;
        cliclack::log::info(format!("Using defaults from {}", path.display()))?;
    }

    if !args.yes {
        collect_answers(&mut sources)?;
    }

    let resolved = resolve(&sources)?;
    for warning in &resolved.warnings {
        cliclack::log::warning(warning.to_string())?;
    }
    let features = resolved.features;
    cliclack::log::success(summarize(&features))?;

    let project_dir = args
        .directory
        .clone()
        .map(|dir| if dir.is_absolute() { dir } else { cwd.join(dir) })
        .unwrap_or_else(|| cwd.join(&features.project_name));

    let table = PackageTable::builtin()?;
    let plan = table.plan(&features)?;
    let composition = compose(&features);

    let report = reconcile(&features, &plan, &table, &project_dir)
        .with_context(|| format!("Failed to reconcile {}", project_dir.display()))?;
    report_reconciliation(&report)?;

    let spinner = cliclack::spinner();
    spinner.start("Writing project files...");
    let summary = match generate(&features, &plan, &composition, &report, &project_dir).await {
        Ok(summary) => summary,
        Err(e) => {
            spinner.stop("Failed to write project files");
            return Err(e);
        }
    };
    spinner.stop(format!(
        "Wrote {} files in {} ({} unchanged)",
        summary.written.len(),
        project_dir.display(),
        summary.skipped.len()
    ));
    if !summary.removed.is_empty() {
        cliclack::log::info(format!("Replaced {}", summary.removed.join(", ")))?;
    }

    let package_manager = PackageManager::detect();
    if args.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
    } else {
        install(&package_manager, &plan, &project_dir).await?;
    }

    if !args.skip_docs {
        print_next_steps(&features, &project_dir, &package_manager)?;
    }

    if features.auto_start && !args.skip_install {
        cliclack::outro("Starting the dev server")?;
        package_manager.run_dev(&project_dir).await?;
    } else {
        cliclack::outro("Happy coding!")?;
    }

    Ok(())
}

/// Ask for every option the flags and preset left open
fn collect_answers(sources: &mut RawConfigSources) -> Result<()> {
    if !sources.is_decided(keys::NAME) {
        let name: String = cliclack::input("Project name")
            .placeholder(DEFAULT_PROJECT_NAME)
            .default_input(DEFAULT_PROJECT_NAME)
            .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
            .interact()?;
        answer(sources, keys::NAME, ConfigValue::text(name));
    }

    if !sources.is_decided(keys::FRAMEWORK) {
        let framework: &str = cliclack::select("Framework")
            .item("react", "React", "Vite")
            .item("next", "Next.js", "App Router")
            .item("vue", "Vue 3", "Vite")
            .interact()?;
        answer(sources, keys::FRAMEWORK, ConfigValue::text(framework));
    }
    // Later questions depend on the framework, which may come from any source
    let framework = resolve(sources)?.features.framework;

    if !sources.is_decided(keys::LANGUAGE) {
        let language: &str = cliclack::select("Language")
            .item("js", "JavaScript", "")
            .item("ts", "TypeScript", "")
            .interact()?;
        answer(sources, keys::LANGUAGE, ConfigValue::text(language));
    }

    if !sources.is_decided(keys::STYLING) && framework != Framework::Vue {
        let styling: &str = cliclack::select("Tailwind CSS version")
            .item("v3", "Tailwind v3", "config file + PostCSS")
            .item("v4", "Tailwind v4", "CSS-first")
            .interact()?;
        answer(sources, keys::STYLING, ConfigValue::text(styling));
    }

    let state_decided = sources.is_decided(keys::STATE_MANAGEMENT)
        || StateManagement::FLAG_KEYS
            .iter()
            .any(|(key, _)| sources.is_decided(key));
    if !state_decided {
        let default = if framework.is_react_family() {
            StateManagement::Zustand
        } else {
            StateManagement::Pinia
        };
        let mut select =
            cliclack::select("State management").item(StateManagement::None, "None", "");
        for state in StateManagement::PRIORITY {
            let hosted = state.is_react_only() == framework.is_react_family();
            if state != StateManagement::None && hosted {
                select = select.item(state, state_label(state), "");
            }
        }
        let state: StateManagement = select.initial_value(default).interact()?;
        answer(
            sources,
            keys::STATE_MANAGEMENT,
            ConfigValue::text(state.as_str()),
        );
    }

    if !sources.is_decided(keys::ROUTER) && framework != Framework::Next {
        let router: bool = cliclack::confirm("Add a router demo?")
            .initial_value(false)
            .interact()?;
        answer(sources, keys::ROUTER, ConfigValue::Bool(router));
    }

    if !sources.is_decided(keys::UI) && framework.is_react_family() {
        let ui: &str = cliclack::select("UI components")
            .item("none", "None", "")
            .item("shadcn", "shadcn/ui", "pins Tailwind v3")
            .interact()?;
        answer(sources, keys::UI, ConfigValue::text(ui));
    }

    let animations_decided = [keys::ANIMATIONS, keys::FRAMER, keys::GSAP]
        .iter()
        .any(|key| sources.is_decided(key));
    if !animations_decided {
        let mut multi = cliclack::multiselect("Animation libraries");
        for animation in Animation::ALL {
            if animation == Animation::Framer && !framework.is_react_family() {
                continue;
            }
            multi = multi.item(animation, animation.integration().display_name(), "");
        }
        let picked: Vec<Animation> = multi.required(false).interact()?;
        answer(
            sources,
            keys::ANIMATIONS,
            ConfigValue::list(picked.iter().map(|a| a.as_str())),
        );
    }

    if !sources.is_decided(keys::FONT) {
        let mut select = cliclack::select("Font").item("none", "System default", "");
        for font in FONT_REGISTRY {
            select = select.item(font.key, font.family, font.category);
        }
        let font: &str = select.interact()?;
        answer(sources, keys::FONT, ConfigValue::text(font));
    }

    if !sources.is_decided(keys::PRETTIER) {
        let prettier: bool = cliclack::confirm("Set up Prettier?")
            .initial_value(true)
            .interact()?;
        answer(sources, keys::PRETTIER, ConfigValue::Bool(prettier));
    }

    if !sources.is_decided(keys::AUTO_START) {
        let auto_start: bool = cliclack::confirm("Start the dev server when done?")
            .initial_value(false)
            .interact()?;
        answer(sources, keys::AUTO_START, ConfigValue::Bool(auto_start));
    }

    Ok(())
}

fn answer(sources: &mut RawConfigSources, key: &str, value: ConfigValue) {
    sources.interactive_answers.insert(key.to_string(), value);
}

fn state_label(state: StateManagement) -> &'static str {
    state
        .integration()
        .map(|id| id.display_name())
        .unwrap_or("None")
}

fn summarize(features: &FeatureSet) -> String {
    let mut parts = vec![
        features.framework.display_name().to_string(),
        features.language.display_name().to_string(),
        format!("Tailwind {}", features.styling),
    ];
    parts.extend(
        features
            .integrations()
            .iter()
            .map(|id| id.display_name().to_string()),
    );
    if let Some(font) = features.font_spec() {
        parts.push(font.family.to_string());
    }
    format!("{}: {}", features.project_name, parts.join(", "))
}

fn report_reconciliation(report: &ReconcileReport) -> Result<()> {
    let kept: Vec<&str> = report
        .already_initialized()
        .iter()
        .map(|id| id.display_name())
        .collect();
    if !kept.is_empty() {
        cliclack::log::info(format!("Already set up: {}", kept.join(", ")))?;
    }
    for outcome in &report.outcomes {
        if outcome.classification != Classification::Removed {
            continue;
        }
        cliclack::log::info(format!(
            "Removed {} ({} files, {} packages, {} scripts)",
            outcome.integration.display_name(),
            outcome.removed_paths.len(),
            outcome.removed_packages.len(),
            outcome.removed_scripts.len()
        ))?;
    }
    Ok(())
}

async fn install(pm: &PackageManager, plan: &DependencyPlan, project_dir: &Path) -> Result<()> {
    match require_node() {
        Ok(node) => cliclack::log::success(format!(
            "{} ({})",
            node.name,
            node.version.as_deref().unwrap_or("unknown")
        ))?,
        Err(e) => {
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Install Node.js and run this command again, or pass --skip-install.");
        }
    }

    cliclack::log::info(format!(
        "Installing {} with {}",
        describe_plan(plan),
        pm
    ))?;
    pm.install(project_dir).await
}

fn print_next_steps(features: &FeatureSet, project_dir: &Path, pm: &PackageManager) -> Result<()> {
    let profile = profile_for(features.framework);
    let steps = profile.next_steps(project_dir, pm.binary());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();

    Ok(())
}
