use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use icon_compiler::{compile_file, CompilerGate, Outcome};
use icon_model::ItemId;
use menu_icons::admin::{save, SaveHooks, SaveOutcome, SubmittedFields};
use menu_icons::menu::{enrich, MenuItem};
use menu_icons::requirements::{parse_version, HostEnv, Requirements};
use menu_render::{render_title, RenderContext, RenderHooks};
use menu_storage::MetaStore;
use semver::Version;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "menu-icons-cli")]
#[command(about = "Menu Icons CLI")]
pub struct Cli {
    /// Store root directory; defaults to the platform-local data directory.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Regenerate the JSON icon dataset from a YAML definition source.
    Compile {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        #[arg(long, value_name = "PATH")]
        output: PathBuf,
        /// Debug flag; regeneration refuses to run without it.
        #[arg(long)]
        debug: bool,
        /// Explicit opt-in to rewriting the dataset file.
        #[arg(long)]
        opt_in: bool,
        /// Assert administrative capability.
        #[arg(long)]
        admin: bool,
    },
    /// Save icon settings for a menu item.
    Set {
        item_id: ItemId,
        /// Hide the text label (integer flag, nonzero hides).
        #[arg(long)]
        label: Option<String>,
        /// Icon position: before or after the title.
        #[arg(long)]
        position: Option<String>,
        /// Vertical alignment: top, middle, or bottom.
        #[arg(long)]
        align: Option<String>,
        /// Icon size in em units.
        #[arg(long)]
        size: Option<String>,
        /// Icon class from the compiled dataset.
        #[arg(long)]
        icon: Option<String>,
        /// CSS color; empty inherits.
        #[arg(long)]
        color: Option<String>,
    },
    /// Print the merged settings record for a menu item.
    Show { item_id: ItemId },
    /// Delete the stored settings record for a menu item.
    Clear { item_id: ItemId },
    /// Print the decorated title for a menu item.
    Render {
        item_id: ItemId,
        #[arg(long)]
        title: String,
        #[arg(long, value_enum, default_value_t = ContextArg::Page)]
        context: ContextArg,
    },
    /// Check activation requirements against a host environment.
    Check {
        #[arg(long, value_name = "VERSION")]
        host_version: String,
        #[arg(long, value_name = "VERSION")]
        runtime_version: String,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContextArg {
    Page,
    Admin,
    Background,
}

impl From<ContextArg> for RenderContext {
    fn from(context: ContextArg) -> Self {
        match context {
            ContextArg::Page => RenderContext::Page,
            ContextArg::Admin => RenderContext::Admin,
            ContextArg::Background => RenderContext::Background,
        }
    }
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let store = open_store(cli.data_dir)?;

    match cli.command {
        Commands::Compile { source, output, debug, opt_in, admin } => {
            let gate = CompilerGate { debug, opt_in, admin };
            run_compile(gate, &source, &output)
        }
        Commands::Set { item_id, label, position, align, size, icon, color } => {
            let mut submitted = SubmittedFields::new();
            let fields = [
                ("label", label),
                ("position", position),
                ("align", align),
                ("size", size),
                ("icon", icon),
                ("color", color),
            ];
            for (key, value) in fields {
                if let Some(value) = value {
                    submitted.insert(key.to_owned(), value);
                }
            }
            run_set(&store, item_id, &submitted)
        }
        Commands::Show { item_id } => run_show(&store, item_id),
        Commands::Clear { item_id } => {
            store.delete(item_id).context("failed to delete stored settings")?;
            println!("cleared item {item_id}");
            Ok(())
        }
        Commands::Render { item_id, title, context } => {
            run_render(&store, item_id, &title, context.into())
        }
        Commands::Check { host_version, runtime_version } => {
            run_check(&host_version, &runtime_version)
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn open_store(data_dir: Option<PathBuf>) -> Result<MetaStore> {
    match data_dir {
        Some(root) => Ok(MetaStore::with_root(root)),
        None => MetaStore::from_default_project().context("failed to resolve store directory"),
    }
}

fn run_compile(gate: CompilerGate, source: &PathBuf, output: &PathBuf) -> Result<()> {
    let outcome = compile_file(gate, source, output).context("failed to compile icon dataset")?;

    match outcome {
        Outcome::Skipped => println!("skipped: compiler gate not satisfied"),
        Outcome::Written { path, records } => {
            println!("{} ({records} icons)", path.display());
        }
    }

    Ok(())
}

fn run_set(store: &MetaStore, item_id: ItemId, submitted: &SubmittedFields) -> Result<()> {
    let outcome =
        save(store, item_id, submitted, &SaveHooks::new()).context("failed to save settings")?;

    match outcome {
        SaveOutcome::Saved => println!("saved item {item_id}"),
        SaveOutcome::Deleted => println!("cleared item {item_id}"),
    }

    Ok(())
}

fn run_show(store: &MetaStore, item_id: ItemId) -> Result<()> {
    let item = MenuItem { id: item_id, title: String::new() };
    let enriched = enrich(item, store).context("failed to load settings")?;

    let json = serde_json::to_string_pretty(&enriched.settings)?;
    println!("{json}");

    Ok(())
}

fn run_render(
    store: &MetaStore,
    item_id: ItemId,
    title: &str,
    context: RenderContext,
) -> Result<()> {
    let item = MenuItem { id: item_id, title: title.to_owned() };
    let enriched = enrich(item, store).context("failed to load settings")?;

    let decorated =
        render_title(&enriched.title, item_id, &enriched.settings, context, &RenderHooks::new());
    println!("{decorated}");

    Ok(())
}

fn run_check(host_version: &str, runtime_version: &str) -> Result<()> {
    let env = HostEnv {
        host_version: parse_version(host_version)
            .with_context(|| format!("invalid host version '{host_version}'"))?,
        runtime_version: parse_version(runtime_version)
            .with_context(|| format!("invalid runtime version '{runtime_version}'"))?,
    };

    let report = Requirements::new("Menu Icons")
        .min_host(Version::new(5, 3, 0))
        .min_runtime(Version::new(7, 2, 0))
        .check(&env);

    if !report.satisfied() {
        anyhow::bail!("{}", report.notice());
    }

    println!("requirements satisfied");
    Ok(())
}
