use std::fs;
use std::time::Duration;

use anyhow::Context as _;
use atelier_application::AppContext;
use atelier_core::Project;
use atelier_storage::{ProjectStore, SettingsStore};
use atelier_ui::{Ui, UiExit};
use directories::ProjectDirs;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dirs =
        ProjectDirs::from("studio", "atelier", "atelier").context("resolve project dirs")?;

    let config_dir = project_dirs.config_dir();
    fs::create_dir_all(config_dir)
        .with_context(|| format!("create config dir {}", config_dir.display()))?;

    let settings_store = SettingsStore::new(config_dir.join("settings.json"));
    let settings = settings_store.load()?;

    let mut ctx = load_catalog(AppContext::new(settings));
    loop {
        let mut ui = Ui::new(ctx);
        let outcome = ui.run()?;
        ctx = outcome.ctx;
        settings_store.save(&ctx.settings)?;

        match outcome.exit {
            UiExit::Quit => break,
            UiExit::Refresh => {
                ctx = load_catalog(ctx);
            }
        }
    }

    Ok(())
}

/// One fetch per page view. A failure becomes an empty catalog with a
/// visible reason; the user retries with an explicit refresh.
fn load_catalog(ctx: AppContext) -> AppContext {
    match fetch_projects(&ctx.settings.api_url) {
        Ok(projects) => ctx.with_projects(projects),
        Err(err) => {
            let mut ctx = ctx;
            ctx.mark_failed(format!("{err:#}"));
            ctx
        }
    }
}

fn fetch_projects(api_url: &str) -> anyhow::Result<Vec<Project>> {
    let url = format!("{api_url}/api/projects");
    let projects: Vec<Project> = ureq::get(&url)
        .timeout(Duration::from_secs(10))
        .call()
        .with_context(|| format!("fetch {url}"))?
        .into_json()
        .context("decode project list")?;

    // Run the payload through the same validation the server seeds with, so
    // a bad record fails here instead of at render time.
    let store = ProjectStore::new(projects).context("validate fetched catalog")?;
    Ok(store.list_all().to_vec())
}
