//! create-bawo-frontend - React, Next.js and Vue starter projects

use anyhow::Result;
use bawo_core::config::{keys, ConfigValue, Preset, RawConfigSources};
use bawo_core::tui::CreateArgs;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BAWO_LOG";

#[derive(Parser, Debug)]
#[command(name = "create-bawo-frontend")]
#[command(about = "Scaffold a React, Next.js or Vue starter with Tailwind and optional integrations")]
#[command(version)]
pub struct Args {
    /// Project name (also the directory created unless --directory is given)
    pub name: Option<String>,

    /// Framework: react, next or vue
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Use TypeScript
    #[arg(long, conflicts_with = "js")]
    pub ts: bool,

    /// Use JavaScript
    #[arg(long)]
    pub js: bool,

    /// Tailwind version: v3 or v4
    #[arg(long, value_name = "VERSION")]
    pub tailwind: Option<String>,

    /// State management: none, zustand, redux, rtkQuery, reactQuery, swr, context or pinia
    #[arg(long)]
    pub state: Option<String>,

    /// Redux Toolkit
    #[arg(long)]
    pub redux: bool,

    /// RTK Query
    #[arg(long = "rtk-query")]
    pub rtk_query: bool,

    /// TanStack React Query
    #[arg(long = "react-query")]
    pub react_query: bool,

    /// SWR
    #[arg(long)]
    pub swr: bool,

    /// Context API + useReducer
    #[arg(long)]
    pub context: bool,

    /// Zustand
    #[arg(long)]
    pub zustand: bool,

    /// Pinia (Vue only)
    #[arg(long)]
    pub pinia: bool,

    /// Add a router demo
    #[arg(long, conflicts_with = "no_router")]
    pub router: bool,

    /// Do not add a router, even if a preset asks for one
    #[arg(long = "no-router")]
    pub no_router: bool,

    /// UI preset: none or shadcn
    #[arg(long)]
    pub ui: Option<String>,

    /// Animation libraries (comma-separated: framer,gsap)
    #[arg(long, value_delimiter = ',')]
    pub animations: Option<Vec<String>>,

    /// Framer Motion
    #[arg(long)]
    pub framer: bool,

    /// GSAP
    #[arg(long)]
    pub gsap: bool,

    /// Google font to load (inter, poppins, space-grotesk, dm-sans, playfair-display)
    #[arg(long)]
    pub font: Option<String>,

    /// Preset bundle: minimal, full or animation
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Directory to generate into (defaults to ./<name>)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Skip Prettier setup
    #[arg(long = "no-prettier")]
    pub no_prettier: bool,

    /// Do not print next steps
    #[arg(long = "skip-docs")]
    pub skip_docs: bool,

    /// Do not start the dev server
    #[arg(long = "no-start")]
    pub no_start: bool,

    /// Write files but do not run the package manager
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Accept defaults for everything not given on the command line
    #[arg(short, long)]
    pub yes: bool,
}

impl Args {
    /// Flags the user actually passed; unset switches stay out so lower sources can decide
    fn sources(&self) -> Result<RawConfigSources> {
        let mut sources = RawConfigSources::default();
        let mut set = |key: &str, value: ConfigValue| {
            sources.flags.insert(key.to_string(), value);
        };

        if let Some(name) = &self.name {
            set(keys::NAME, ConfigValue::text(name.as_str()));
        }
        if let Some(framework) = &self.framework {
            set(keys::FRAMEWORK, ConfigValue::text(framework.as_str()));
        }
        if self.ts {
            set(keys::LANGUAGE, ConfigValue::text("ts"));
        } else if self.js {
            set(keys::LANGUAGE, ConfigValue::text("js"));
        }
        if let Some(tailwind) = &self.tailwind {
            set(keys::STYLING, ConfigValue::text(tailwind.as_str()));
        }
        if let Some(state) = &self.state {
            set(keys::STATE_MANAGEMENT, ConfigValue::text(state.as_str()));
        }
        for (key, on) in [
            (keys::REDUX, self.redux),
            (keys::RTK_QUERY, self.rtk_query),
            (keys::REACT_QUERY, self.react_query),
            (keys::SWR, self.swr),
            (keys::CONTEXT, self.context),
            (keys::ZUSTAND, self.zustand),
            (keys::PINIA, self.pinia),
            (keys::FRAMER, self.framer),
            (keys::GSAP, self.gsap),
        ] {
            if on {
                set(key, ConfigValue::Bool(true));
            }
        }
        if self.router {
            set(keys::ROUTER, ConfigValue::Bool(true));
        } else if self.no_router {
            set(keys::ROUTER, ConfigValue::Bool(false));
        }
        if let Some(ui) = &self.ui {
            set(keys::UI, ConfigValue::text(ui.as_str()));
        }
        if let Some(animations) = &self.animations {
            set(keys::ANIMATIONS, ConfigValue::list(animations.iter().cloned()));
        }
        if let Some(font) = &self.font {
            set(keys::FONT, ConfigValue::text(font.as_str()));
        }
        if self.no_prettier {
            set(keys::PRETTIER, ConfigValue::Bool(false));
        }
        // Accepting defaults also starts the dev server, unless told not to
        if self.no_start {
            set(keys::AUTO_START, ConfigValue::Bool(false));
        } else if self.yes {
            set(keys::AUTO_START, ConfigValue::Bool(true));
        }

        if let Some(preset) = &self.preset {
            sources.preset = Some(preset.parse::<Preset>()?);
        }
        Ok(sources)
    }

    fn into_create_args(self) -> Result<CreateArgs> {
        Ok(CreateArgs {
            sources: self.sources()?,
            directory: self.directory,
            yes: self.yes,
            skip_docs: self.skip_docs,
            skip_install: self.skip_install,
        })
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_logging();

    let result = match Args::parse().into_create_args() {
        Ok(create_args) => bawo_core::run(create_args).await,
        Err(e) => Err(e),
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
