//! Paginated listing and single-study lookup

use indicatif::ProgressBar;
use trialmap_core::{FetchError, FlatTrial, fmt_num};

use crate::api::{PageQuery, StudySource};
use crate::config::RegistryConfig;
use crate::flatten::flatten_study;

/// Page/record counters from one listing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub pages: usize,
    pub received: usize,
    pub kept: usize,
}

/// Runs registry queries against a [`StudySource`].
pub struct StudyFetcher<'a, S: ?Sized> {
    source: &'a S,
    config: &'a RegistryConfig,
}

impl<'a, S: StudySource + ?Sized> StudyFetcher<'a, S> {
    pub fn new(source: &'a S, config: &'a RegistryConfig) -> Self {
        Self { source, config }
    }

    /// Fetch every page for the configured location query.
    ///
    /// Pages are requested one after another, each with the token returned
    /// by the previous page, until a page carries no token. Only studies with
    /// at least one city in Tunisia are kept. Any failed page fails the whole
    /// call and nothing accumulated so far is returned.
    pub async fn fetch_all(
        &self,
        pb: &ProgressBar,
    ) -> Result<(Vec<FlatTrial>, FetchStats), FetchError> {
        let base = PageQuery::by_location(&self.config.location_query, self.config.page_size);
        let mut query = base.clone();
        let mut trials = Vec::new();
        let mut stats = FetchStats::default();

        loop {
            let page = self.source.fetch_page(&query).await.map_err(|e| {
                log::debug!("page {} failed: {e}", stats.pages + 1);
                e
            })?;
            stats.pages += 1;
            stats.received += page.studies.len();

            for study in &page.studies {
                let flat = flatten_study(study);
                if !flat.cities.is_empty() {
                    trials.push(flat);
                }
            }
            stats.kept = trials.len();
            pb.set_message(format!(
                "page {}: {} studies kept",
                stats.pages,
                fmt_num(stats.kept)
            ));
            log::debug!(
                "page {}: {} studies, {} kept so far",
                stats.pages,
                page.studies.len(),
                stats.kept
            );

            match page.next_page_token {
                Some(token) => query = base.with_token(Some(token)),
                None => break,
            }
        }

        log::info!(
            "Fetched {} studies over {} pages, {} with sites in {}",
            fmt_num(stats.received),
            stats.pages,
            fmt_num(stats.kept),
            self.config.location_query
        );
        Ok((trials, stats))
    }

    /// Look up one study by NCT ID.
    ///
    /// Runs a term search and keeps only the study whose NCT ID is exactly
    /// `nct_id`. `Ok(None)` for an empty id or no exact match.
    pub async fn fetch_by_nct_id(&self, nct_id: &str) -> Result<Option<FlatTrial>, FetchError> {
        if nct_id.trim().is_empty() {
            return Ok(None);
        }
        let query = PageQuery::by_term(nct_id, self.config.search_page_size);
        let page = self.source.fetch_page(&query).await?;

        let found = page.studies.iter().find(|s| s.nct_id() == Some(nct_id));
        if found.is_none() {
            log::debug!(
                "{nct_id}: no exact match among {} search results",
                page.studies.len()
            );
        }
        Ok(found.map(flatten_study))
    }
}

/// Fetch all studies located in Tunisia using the default registry settings.
pub async fn fetch_all_tunisia_studies<S: StudySource + ?Sized>(
    source: &S,
) -> Result<Vec<FlatTrial>, FetchError> {
    let config = RegistryConfig::default();
    let (trials, _) = StudyFetcher::new(source, &config)
        .fetch_all(&ProgressBar::hidden())
        .await?;
    Ok(trials)
}

/// Fetch one study by NCT ID using the default registry settings.
pub async fn fetch_study_by_nct_id<S: StudySource + ?Sized>(
    source: &S,
    nct_id: &str,
) -> Result<Option<FlatTrial>, FetchError> {
    let config = RegistryConfig::default();
    StudyFetcher::new(source, &config)
        .fetch_by_nct_id(nct_id)
        .await
}
