//! MyAnimeList v2 list client.
//!
//! Read-only: a static `X-MAL-CLIENT-ID` credential is passed through on
//! every request, there is no OAuth flow and no retry policy. Failures
//! fold into the uniform [`CollectionFetchResult`] shape so the caller can
//! surface them inline next to whatever data did arrive.

use reqwest::Client;
use url::Url;

use tsundoku_core::config::DEFAULT_PAGE_CAP;
use tsundoku_core::{CollectionFetchResult, CollectionKind};

use crate::error::MalError;
use crate::normalize;
use crate::types::MalListResponse;

const BASE_URL: &str = "https://api.myanimelist.net/v2";
const CLIENT_ID_HEADER: &str = "X-MAL-CLIENT-ID";

/// Requested field sets. The two kinds differ in one field: anime lists
/// count episodes watched, manga lists chapters read.
const ANIME_FIELDS: &str = "list_status{status,score,num_episodes_watched,tags,start_date,\
                            finish_date},media_type,alternative_titles{ja}";
const MANGA_FIELDS: &str = "list_status{status,score,num_chapters_read,tags,start_date,\
                            finish_date},media_type,alternative_titles{ja}";

/// Page size when none is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 6;
/// Page size used by the full-list fetch when none is requested.
pub const FULL_LIST_PAGE_LIMIT: u32 = 100;

/// MyAnimeList API v2 list client.
pub struct MalClient {
    client_id: String,
    username: String,
    page_cap: usize,
    http: Client,
}

impl MalClient {
    pub fn new(client_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            username: username.into(),
            page_cap: DEFAULT_PAGE_CAP,
            http: Client::new(),
        }
    }

    /// Override the fetch-all pagination guard.
    pub fn with_page_cap(mut self, page_cap: usize) -> Self {
        self.page_cap = page_cap;
        self
    }

    /// Fetch one page of the user's list, normalized.
    ///
    /// Missing credentials fail before any network call; a failed page
    /// returns an empty item list with the error message set.
    pub async fn fetch_list(
        &self,
        kind: CollectionKind,
        limit: Option<u32>,
    ) -> CollectionFetchResult {
        match self.first_page(kind, limit.unwrap_or(DEFAULT_PAGE_LIMIT)).await {
            Ok(page) => page,
            Err(err) => CollectionFetchResult::failed(err.to_string()),
        }
    }

    /// Fetch the user's complete list by following pagination cursors,
    /// one request at a time, up to the page cap.
    ///
    /// A first-page failure is returned as-is. A failure while following
    /// a later cursor stops accumulation and returns the partial list
    /// with no error set; partial data beats none.
    pub async fn fetch_list_all(
        &self,
        kind: CollectionKind,
        limit: Option<u32>,
    ) -> CollectionFetchResult {
        let mut result = match self
            .first_page(kind, limit.unwrap_or(FULL_LIST_PAGE_LIMIT))
            .await
        {
            Ok(page) => page,
            Err(err) => return CollectionFetchResult::failed(err.to_string()),
        };

        let mut followed = 0usize;
        while let Some(cursor) = result.next.take() {
            if followed >= self.page_cap {
                tracing::debug!(pages = followed, "page cap reached, stopping fetch-all");
                break;
            }
            match self.follow_cursor(kind, &cursor).await {
                Ok(page) => {
                    result.items.extend(normalize::map_items(kind, page.data));
                    result.next = page.paging.next;
                }
                Err(err) => {
                    tracing::debug!(error = %err, "continuation page failed, keeping partial list");
                    break;
                }
            }
            followed += 1;
        }

        result.next = None;
        result
    }

    async fn first_page(
        &self,
        kind: CollectionKind,
        limit: u32,
    ) -> Result<CollectionFetchResult, MalError> {
        self.check_credentials()?;

        let url = self.list_url(kind, limit)?;
        let response = self
            .http
            .get(url)
            .header(CLIENT_ID_HEADER, &self.client_id)
            .send()
            .await?;
        let response = check_status(kind, response)?;

        let page: MalListResponse = response
            .json()
            .await
            .map_err(|e| MalError::Parse(e.to_string()))?;
        let items = normalize::map_items(kind, page.data);
        tracing::debug!(%kind, count = items.len(), "fetched list page");

        Ok(CollectionFetchResult {
            items,
            error: None,
            next: page.paging.next,
        })
    }

    async fn follow_cursor(
        &self,
        kind: CollectionKind,
        cursor: &str,
    ) -> Result<MalListResponse, MalError> {
        // The cursor is an opaque URL from the previous response envelope.
        let url = Url::parse(cursor).map_err(|e| MalError::Parse(e.to_string()))?;
        let response = self
            .http
            .get(url)
            .header(CLIENT_ID_HEADER, &self.client_id)
            .send()
            .await?;
        let response = check_status(kind, response)?;

        response
            .json()
            .await
            .map_err(|e| MalError::Parse(e.to_string()))
    }

    fn check_credentials(&self) -> Result<(), MalError> {
        if self.client_id.is_empty() {
            return Err(MalError::MissingClientId);
        }
        if self.username.is_empty() {
            return Err(MalError::MissingUsername);
        }
        Ok(())
    }

    fn list_url(&self, kind: CollectionKind, limit: u32) -> Result<Url, MalError> {
        let mut url = Url::parse(BASE_URL).map_err(|e| MalError::Parse(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| MalError::Parse("base URL cannot hold a path".into()))?
            .push("users")
            .push(&self.username)
            .push(&format!("{kind}list"));
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("fields", fields_for(kind))
            .append_pair("nsfw", "true");
        Ok(url)
    }
}

fn fields_for(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Anime => ANIME_FIELDS,
        CollectionKind::Manga => MANGA_FIELDS,
    }
}

fn check_status(
    kind: CollectionKind,
    response: reqwest::Response,
) -> Result<reqwest::Response, MalError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status().as_u16();
        tracing::warn!(status, %kind, "MAL API error");
        Err(MalError::Status { kind, status })
    }
}
