use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use scraper::{Html, Selector};

use crate::config::{fill_url, Config, SourceKind};
use crate::error::FetchError;
use crate::model::DrawResult;
use crate::parse::parse_description;
use crate::wire::LottoNumber;

static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("description selector")
});

/// Where draws come from. One outbound request per call, no retry.
#[async_trait]
pub trait DrawSource: Send + Sync {
    async fn fetch_draw(&self, draw_no: u32) -> Result<DrawResult, FetchError>;
}

/// Build the source selected in the config.
pub fn from_config(cfg: &Config) -> anyhow::Result<Arc<dyn DrawSource>> {
    let client = http_client(cfg)?;
    let source: Arc<dyn DrawSource> = match cfg.source {
        SourceKind::Page => Arc::new(PageSource::new(client, cfg.page_url.clone())),
        SourceKind::Json => Arc::new(JsonSource::new(client, cfg.json_url.clone())),
    };
    tracing::info!(source = ?cfg.source, "draw source ready");
    Ok(source)
}

/// Shared client: browser-like headers, bounded timeout.
pub fn http_client(cfg: &Config) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ko-KR,ko;q=0.9,en;q=0.5"));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .user_agent(cfg.user_agent.as_str())
        .default_headers(headers)
        .build()?;
    Ok(client)
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    tracing::debug!(url, "remote: GET");
    let t0 = Instant::now();
    let resp = client.get(url).send().await?.error_for_status()?;
    let body = resp.text().await?;
    tracing::debug!(url, bytes = body.len(), ms = t0.elapsed().as_millis() as u64, "remote: fetched");
    Ok(body)
}

/// Content of `<meta name="description">`, if the page has one.
pub fn description_of(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&DESCRIPTION)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
}

/// Per-draw results page; the draw is read from the description meta tag.
pub struct PageSource {
    client: reqwest::Client,
    url_template: String,
}

impl PageSource {
    pub fn new(client: reqwest::Client, url_template: impl Into<String>) -> Self {
        Self { client, url_template: url_template.into() }
    }

    fn url(&self, draw_no: u32) -> String {
        fill_url(&self.url_template, draw_no)
    }
}

#[async_trait]
impl DrawSource for PageSource {
    async fn fetch_draw(&self, draw_no: u32) -> Result<DrawResult, FetchError> {
        let html = get_text(&self.client, &self.url(draw_no)).await?;
        description_of(&html)
            .and_then(|text| parse_description(draw_no, &text))
            .ok_or(FetchError::NotFound(draw_no))
    }
}

/// The operator's `getLottoNumber` JSON endpoint.
pub struct JsonSource {
    client: reqwest::Client,
    url_template: String,
}

impl JsonSource {
    pub fn new(client: reqwest::Client, url_template: impl Into<String>) -> Self {
        Self { client, url_template: url_template.into() }
    }

    fn url(&self, draw_no: u32) -> String {
        fill_url(&self.url_template, draw_no)
    }
}

#[async_trait]
impl DrawSource for JsonSource {
    async fn fetch_draw(&self, draw_no: u32) -> Result<DrawResult, FetchError> {
        let body = get_text(&self.client, &self.url(draw_no)).await?;
        let mut rec: LottoNumber = serde_json::from_str(&body)?;
        match rec.drw_no {
            0 => rec.drw_no = draw_no,
            n if n != draw_no => {
                tracing::warn!(requested = draw_no, returned = n, "remote: draw number mismatch");
                return Err(FetchError::NotFound(draw_no));
            }
            _ => {}
        }
        rec.into_draw().ok_or(FetchError::NotFound(draw_no))
    }
}
