//! CLI runner - executes commands

use crate::api::{ListingScope, PhotoApi};
use crate::auth::{CredentialSource, StaticCredential};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::continuation::{sentinel_channel, ContinuationGate, ManualViewport};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::listing::PhotoListing;
use crate::pagination::LoadOutcome;
use crate::signing::AuthenticatedUrlBuilder;
use crate::types::Photo;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List {
                person,
                pages,
                page_size,
            } => self.list(person.clone(), *pages, *page_size).await,
            Commands::Sign { path } => self.sign(path).await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load the config file (if any) and apply command-line overrides
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        if let Some(base_url) = &self.cli.base_url {
            config.api_base_url = Some(base_url.clone());
        }
        Ok(config)
    }

    fn credentials(&self) -> Arc<dyn CredentialSource> {
        match &self.cli.token {
            Some(token) if !token.is_empty() => Arc::new(StaticCredential::new(token.clone())),
            _ => Arc::new(StaticCredential::none()),
        }
    }

    /// Page through a listing until it is exhausted, fails or hits `max_pages`
    async fn list(
        &self,
        person: Option<String>,
        max_pages: Option<usize>,
        page_size: Option<u32>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(page_size) = page_size {
            config.page_size = page_size;
        }
        config.validate()?;

        let credentials = self.credentials();
        let http = Arc::new(HttpClient::new(
            config.http_client_config(),
            Arc::clone(&credentials),
        )?);
        let api = PhotoApi::with_paths(http, &config.photos_path, &config.person_photos_path);
        let scope = person.map_or(ListingScope::All, ListingScope::Person);
        let urls = AuthenticatedUrlBuilder::new(config.url_builder_config())?;
        let listing = PhotoListing::new(
            Arc::new(api.listing(scope.clone())),
            config.page_size,
            urls,
            credentials,
        )?;

        info!(?scope, page_size = config.page_size, "Listing photos");
        let start = Instant::now();

        // Headless: the sentinel sits right after the last printed photo, so
        // it is back in view every time a page has been written out.
        let viewport = ManualViewport::new();
        let (observation, mut ticks) = sentinel_channel(&viewport, config.trigger_margin());

        let mut printed = 0;
        let mut pages = 0;
        loop {
            if max_pages.is_some_and(|max| pages >= max) {
                debug!(pages, "Page limit reached");
                break;
            }
            viewport.enter();
            if ticks.recv().await.is_none() {
                break;
            }

            let Some(outcome) = listing.on_viewport_enter(ContinuationGate::open()).await else {
                break;
            };
            if matches!(
                outcome,
                LoadOutcome::Applied { .. } | LoadOutcome::Exhausted { .. }
            ) {
                pages += 1;
            }

            let photos = listing.photos();
            for photo in &photos[printed..] {
                self.print_photo(&listing, photo).await?;
            }
            printed = photos.len();
        }
        observation.stop();

        if let Some(error) = listing.error() {
            return Err(Error::Other(format!(
                "Listing stopped after {printed} photos: {error}"
            )));
        }

        info!(
            photos = printed,
            pages,
            has_more = listing.has_more(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Listing complete"
        );
        Ok(())
    }

    async fn print_photo(&self, listing: &PhotoListing, photo: &Photo) -> Result<()> {
        let thumbnail = self.sign_optional(listing, &photo.thumbnail_url).await?;
        let full = self.sign_optional(listing, &photo.url).await?;

        match self.cli.format {
            OutputFormat::Json => {
                let line = json!({
                    "id": photo.id,
                    "filename": photo.filename,
                    "thumbnail_url": thumbnail,
                    "url": full,
                });
                println!("{line}");
            }
            OutputFormat::Pretty => {
                println!(
                    "{}\t{}\t{}",
                    photo.id,
                    photo.filename,
                    thumbnail.as_deref().unwrap_or("-")
                );
            }
        }
        Ok(())
    }

    /// Photos without a media path print `null` rather than failing the run
    async fn sign_optional(&self, listing: &PhotoListing, path: &str) -> Result<Option<String>> {
        if path.is_empty() {
            return Ok(None);
        }
        let url = listing.build_authenticated_url(path).await?;
        Ok(Some(url.into()))
    }

    /// Print one authenticated media URL
    async fn sign(&self, path: &str) -> Result<()> {
        let config = self.load_config()?;
        let urls = AuthenticatedUrlBuilder::new(config.url_builder_config())?;
        let credentials = self.credentials();

        let url = urls.build_with(path, credentials.as_ref()).await?;
        println!("{url}");
        Ok(())
    }

    /// Print the resolved configuration as YAML
    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}
