//! Command implementations

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::Path;
use wsform_cli::{local_collaborators, render_text, OptionsReport};
use wsform_config::GlobalConfig;
use wsform_core::{CustomWorkspaceForm, FormEvent, Initializer, SelectField};

/// Load the config and run both initialization flows
async fn initialized_form(config_path: &Path) -> Result<CustomWorkspaceForm> {
    let config = GlobalConfig::load_from(config_path)?;
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let initializer = Initializer::new(local_collaborators(&config, config_dir));
    let mut form = CustomWorkspaceForm::new(config.form.clone());
    form.initialize(&initializer)
        .await
        .context("Failed to load namespaces")?;
    Ok(form)
}

pub async fn show(config_path: &Path, json: bool) -> Result<()> {
    let form = initialized_form(config_path).await?;

    if json {
        let report = OptionsReport::from_form(&form);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&form));
    }
    Ok(())
}

pub async fn pick(config_path: &Path) -> Result<()> {
    let mut form = initialized_form(config_path).await?;
    let mut events = form.subscribe();
    let theme = ColorfulTheme::default();

    if let Some(choice) = prompt_select(&theme, form.namespace_select.as_ref())? {
        form.apply(FormEvent::NamespaceSelected(choice));
    }
    if let Some(choice) = prompt_select(&theme, form.devfile_select.as_ref())? {
        form.apply(FormEvent::DevfileSelected(choice));
    }

    let name: String = Input::with_theme(&theme)
        .with_prompt(form.workspace_name.placeholder.as_str())
        .allow_empty(true)
        .interact_text()?;
    form.apply(FormEvent::WorkspaceNameChanged(name));

    let temporary = Confirm::with_theme(&theme)
        .with_prompt("Temporary storage")
        .default(false)
        .interact()?;
    form.apply(FormEvent::TemporaryStorageToggled(temporary));

    let url: String = Input::with_theme(&theme)
        .with_prompt(form.devfile_url.placeholder.as_str())
        .allow_empty(true)
        .interact_text()?;
    form.apply(FormEvent::DevfileUrlChanged(url));

    if !form.load_devfile.disabled
        && Confirm::with_theme(&theme)
            .with_prompt(form.load_devfile.title.as_str())
            .default(true)
            .interact()?
    {
        form.apply(FormEvent::LoadDevfileClicked);
    }

    while let Ok(event) = events.try_recv() {
        tracing::debug!("Form event: {:?}", event);
    }

    println!("{}", serde_json::to_string_pretty(&form.values())?);
    Ok(())
}

/// Ask for one of the options; disabled selectors keep their default
fn prompt_select(theme: &ColorfulTheme, select: Option<&SelectField>) -> Result<Option<String>> {
    let select = match select {
        Some(s) if !s.options.is_empty() && !s.options.disabled => s,
        _ => return Ok(None),
    };

    let items = &select.options.options;
    let start = select
        .selected()
        .and_then(|current| items.iter().position(|o| o == current))
        .unwrap_or(0);

    let index = Select::with_theme(theme)
        .with_prompt(select.placeholder.as_str())
        .items(items.as_slice())
        .default(start)
        .interact()?;
    Ok(items.get(index).cloned())
}

pub fn config(config_path: &Path, edit: bool) -> Result<()> {
    if edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

        if !config_path.exists() {
            GlobalConfig::default().save_to(config_path)?;
            println!("Created default config at {:?}", config_path);
        }

        std::process::Command::new(&editor)
            .arg(config_path)
            .status()
            .context(format!("Failed to open editor: {}", editor))?;
    } else if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        println!("# Config file: {:?}\n", config_path);
        println!("{}", content);
    } else {
        println!("# Config file: {:?} (not created yet)\n", config_path);
        println!("# Default configuration:");
        let content = toml::to_string_pretty(&GlobalConfig::default())?;
        println!("{}", content);
        println!("\n# Run 'wsform config --edit' to create and edit the config file.");
    }

    Ok(())
}
