//! Scan-target rendering over the section catalog.

use super::{ScanTarget, SectionListing};
use crate::catalog::ports::{CatalogRepository, CatalogRepositoryError};
use crate::error::ErrorKind;
use minijinja::{Environment, UndefinedBehavior, context};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Template used when none is configured.
pub const DEFAULT_SCAN_URL_TEMPLATE: &str = "{{ base_url }}/{{ code }}";

/// Errors raised while listing sections or rendering scan targets.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The scan URL template failed to render for a section.
    #[error("failed to render scan URL for section {code}: {reason}")]
    TemplateRender {
        /// Code of the section being rendered.
        code: String,
        /// Renderer message.
        reason: String,
    },
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
}

impl ProvisioningError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TemplateRender { .. } => ErrorKind::ValidationFailure,
            Self::Catalog(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for provisioning operations.
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;

/// Lists sections and renders their scan targets.
#[derive(Clone)]
pub struct ProvisioningService<K>
where
    K: CatalogRepository,
{
    catalog: Arc<K>,
    template: String,
}

impl<K> ProvisioningService<K>
where
    K: CatalogRepository,
{
    /// Creates a service using [`DEFAULT_SCAN_URL_TEMPLATE`].
    #[must_use]
    pub fn new(catalog: Arc<K>) -> Self {
        Self {
            catalog,
            template: DEFAULT_SCAN_URL_TEMPLATE.to_owned(),
        }
    }

    /// Replaces the scan URL template.
    ///
    /// The template sees `base_url`, `id`, `code`, `name`, and
    /// `description`.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Lists every section ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::Catalog`] when lookup fails.
    pub async fn list_sections(&self) -> ProvisioningResult<Vec<SectionListing>> {
        let sections = self.catalog.list_sections().await?;
        Ok(sections.iter().map(SectionListing::from).collect())
    }

    /// Renders the scan target of every section against `base_url`.
    ///
    /// Trailing slashes on `base_url` are dropped before rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::TemplateRender`] when the template is
    /// malformed or names an unknown variable, and
    /// [`ProvisioningError::Catalog`] when lookup fails.
    pub async fn scan_targets(&self, base_url: &str) -> ProvisioningResult<Vec<ScanTarget>> {
        let trimmed_base = base_url.trim().trim_end_matches('/');
        let mut environment = Environment::new();
        environment.set_undefined_behavior(UndefinedBehavior::Strict);

        let listings = self.list_sections().await?;
        let targets = listings
            .into_iter()
            .map(|section| -> ProvisioningResult<ScanTarget> {
                let url = environment
                    .render_str(
                        &self.template,
                        context! {
                            base_url => trimmed_base,
                            id => section.id.to_string(),
                            code => &section.code,
                            name => &section.name,
                            description => &section.description,
                        },
                    )
                    .map_err(|err| ProvisioningError::TemplateRender {
                        code: section.code.clone(),
                        reason: err.to_string(),
                    })?;
                Ok(ScanTarget { section, url })
            })
            .collect::<ProvisioningResult<Vec<_>>>()?;
        debug!(count = targets.len(), base_url = trimmed_base, "rendered scan targets");
        Ok(targets)
    }
}
