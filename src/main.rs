use attendfill::{
    AutofillError, ChromeBrowser, Config, FileSettingsStore, LivePage, Orchestrator, SettingsStore,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "attendfill", version, about = "Autofill the internship attendance form")]
struct Cli {
    /// Settings file holding the user-configured fields
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save the user-configured fields
    Configure {
        #[arg(long)]
        internship_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
    },
    /// Print the stored fields
    Show,
    /// Open the attendance form and run the autofill loop
    Run {
        /// URL of the attendance form
        #[arg(long)]
        url: String,
        /// Show the browser window instead of running headless
        #[arg(long)]
        headed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(path) = cli.settings {
        config.settings.path = path;
    }
    let store = FileSettingsStore::new(config.settings.path.clone());

    match cli.command {
        Command::Configure {
            internship_id,
            name,
            mobile,
        } => {
            let mut settings = store.load().await?;
            if let Some(value) = internship_id {
                settings.internship_id = value;
            }
            if let Some(value) = name {
                settings.name = value;
            }
            if let Some(value) = mobile {
                settings.mobile = value;
            }
            store.save(&settings).await?;
            println!("Saved!");
        }
        Command::Show => {
            let settings = store.load().await?;
            println!("internshipId: {}", settings.internship_id);
            println!("name:         {}", settings.name);
            println!("mobile:       {}", settings.mobile);
        }
        Command::Run { url, headed } => {
            url::Url::parse(&url).map_err(|e| AutofillError::InvalidUrl(e.to_string()))?;
            config.browser.headless = !headed;

            info!(%url, "opening attendance form");
            let page = LivePage::open(ChromeBrowser::new(), &config, &url).await?;
            info!(session_id = page.session_id(), "page ready, starting autofill loop");

            let orchestrator = Orchestrator::new(&page, config.fill.clone());
            orchestrator.run(&store).await?;

            info!("autofill loop finished");
        }
    }

    Ok(())
}
