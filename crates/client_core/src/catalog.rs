//! Access to the remote lesson catalog service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Lesson, LessonId},
    error::ApiError,
    protocol::{Acknowledgement, OrderRequest, SearchQuery, SpacesUpdate},
};
use tracing::debug;
use url::Url;

use crate::error::CatalogError;

pub const DEFAULT_CATALOG_URL: &str = "https://cst3144-backend-application.onrender.com/M00908970";

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_lessons(&self) -> Result<Vec<Lesson>, CatalogError>;
    async fn search_lessons(&self, query: &str) -> Result<Vec<Lesson>, CatalogError>;
    async fn update_lesson_spaces(
        &self,
        lesson_id: &LessonId,
        spaces: u32,
    ) -> Result<Acknowledgement, CatalogError>;
    async fn submit_order(&self, order: &OrderRequest) -> Result<Acknowledgement, CatalogError>;
}

/// [`CatalogService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    http: Client,
    base_url: Url,
}

impl HttpCatalogService {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            http: Client::new(),
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` rejects cannot-be-a-base urls, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    let url = Url::parse(raw.trim()).map_err(|err| CatalogError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(CatalogError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "expected an http(s) base url".to_string(),
        });
    }
    Ok(url)
}

async fn check_status(res: Response) -> Result<Response, CatalogError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(CatalogError::Status {
        status: status.as_u16(),
        message: ApiError::from_body(&body)
            .map(|err| err.message)
            .or_else(|| status.canonical_reason().map(str::to_string)),
    })
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn fetch_lessons(&self) -> Result<Vec<Lesson>, CatalogError> {
        let url = self.endpoint(&["lessons"]);
        debug!(%url, "fetching lessons");
        let res = self.http.get(url).send().await?;
        Ok(check_status(res).await?.json().await?)
    }

    async fn search_lessons(&self, query: &str) -> Result<Vec<Lesson>, CatalogError> {
        let url = self.endpoint(&["search"]);
        debug!(%url, query, "searching lessons");
        let res = self
            .http
            .get(url)
            .query(&SearchQuery { q: query })
            .send()
            .await?;
        Ok(check_status(res).await?.json().await?)
    }

    async fn update_lesson_spaces(
        &self,
        lesson_id: &LessonId,
        spaces: u32,
    ) -> Result<Acknowledgement, CatalogError> {
        let url = self.endpoint(&["lessons", lesson_id.as_str()]);
        debug!(%url, spaces, "updating lesson spaces");
        let res = self
            .http
            .put(url)
            .json(&SpacesUpdate { spaces })
            .send()
            .await?;
        // Any 2xx means the write landed; the body only feeds the notification.
        let body = check_status(res).await?.text().await?;
        Ok(Acknowledgement::from_body(&body))
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<Acknowledgement, CatalogError> {
        let url = self.endpoint(&["order"]);
        debug!(%url, lessons = order.lessons.len(), "submitting order");
        let res = self.http.post(url).json(order).send().await?;
        Ok(check_status(res).await?.json().await?)
    }
}
