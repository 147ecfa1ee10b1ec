use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use house_hunt::search::{SearchCoordinator, SearchForm, FIELD_LABELS};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Interactive search form: prompt, search, show, repeat
pub struct Shell {
    coordinator: SearchCoordinator,
    form: SearchForm,
}

impl Shell {
    pub fn new(coordinator: SearchCoordinator) -> Self {
        Self {
            coordinator,
            form: SearchForm::default(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            let previous = self.form.clone();
            self.form = tokio::task::spawn_blocking(move || prompt_form(previous))
                .await
                .context("Form prompt task failed")??;

            println!();
            println!("{}", self.form.summary());

            let cancel = CancellationToken::new();
            let watcher = tokio::spawn({
                let cancel = cancel.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("Interrupt received, cancelling search");
                        cancel.cancel();
                    }
                }
            });

            println!("Fetching your listings... (ctrl+c to abort)");
            let outcome = self.coordinator.submit(&self.form, cancel).await;
            watcher.abort();

            match outcome {
                Ok(result) => {
                    debug!(
                        areas = result.areas_completed,
                        listings = result.blocks.len(),
                        "Rendering results"
                    );
                    println!(
                        "Here are the houses that we fetched for you: \n\n{}",
                        result.render()
                    );
                }
                Err(err) if err.is_user_correctable() => {
                    println!("{}. Please correct the form and try again.\n", err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            if !ask_search_again().await? {
                return Ok(());
            }
        }
    }
}

/// Ask for every field, starting from the previous answers
fn prompt_form(mut form: SearchForm) -> Result<SearchForm> {
    let theme = ColorfulTheme::default();
    for (label, slot) in FIELD_LABELS.iter().zip(form.fields_mut()) {
        let value = Input::<String>::with_theme(&theme)
            .with_prompt(*label)
            .with_initial_text(slot.as_str())
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read \"{}\"", label))?;
        *slot = value;
    }
    Ok(form)
}

async fn ask_search_again() -> Result<bool> {
    tokio::task::spawn_blocking(|| {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Search again?")
            .default(true)
            .interact()
            .context("Failed to read confirmation")
    })
    .await
    .context("Confirmation prompt task failed")?
}
