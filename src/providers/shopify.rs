//! Shopify Admin API blog publishing.

use anyhow::{bail, Context, Result};
use castdir_core::config::ShopifyConfig;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2024-01";

/// A fully resolved publishing target: store, blog, and credentials.
pub struct ShopifyTarget {
    pub store_domain: String,
    pub blog_id: String,
    access_token: String,
}

impl ShopifyTarget {
    /// Build a target from studio config plus the access token in the
    /// environment. Returns None when any piece is missing; the caller
    /// treats that as "publishing not configured", not an error.
    pub fn resolve(config: &ShopifyConfig) -> Option<Self> {
        let store_domain = config.store_domain.clone()?;
        let blog_id = config.blog_id.clone()?;
        let access_token = std::env::var("SHOPIFY_ADMIN_ACCESS_TOKEN").ok()?;

        Some(ShopifyTarget {
            store_domain,
            blog_id,
            access_token,
        })
    }
}

pub struct ArticleDraft<'a> {
    pub title: &'a str,
    pub body_html: String,
    pub tags: String,
    pub summary_html: Option<String>,
}

pub struct PublishedArticle {
    pub external_id: String,
    pub external_url: Option<String>,
}

#[derive(Serialize)]
struct ArticleRequest<'a> {
    article: ArticleBody<'a>,
}

#[derive(Serialize)]
struct ArticleBody<'a> {
    title: &'a str,
    body_html: &'a str,
    published: bool,
    tags: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary_html: Option<&'a str>,
}

#[derive(Deserialize)]
struct ArticleResponse {
    article: Article,
}

#[derive(Deserialize)]
struct Article {
    id: u64,
    handle: Option<String>,
}

/// Create a published article on the target blog.
pub async fn publish_article(
    client: &reqwest::Client,
    target: &ShopifyTarget,
    draft: &ArticleDraft<'_>,
) -> Result<PublishedArticle> {
    let url = format!(
        "https://{}/admin/api/{}/blogs/{}/articles.json",
        target.store_domain, API_VERSION, target.blog_id
    );

    let request = ArticleRequest {
        article: ArticleBody {
            title: draft.title,
            body_html: &draft.body_html,
            published: true,
            tags: &draft.tags,
            summary_html: draft.summary_html.as_deref(),
        },
    };

    let response = client
        .post(&url)
        .header("X-Shopify-Access-Token", &target.access_token)
        .json(&request)
        .send()
        .await
        .context("Shopify API request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(500).collect();
        bail!("{}: {}", status, body);
    }

    let data: ArticleResponse = response
        .json()
        .await
        .context("Failed to parse Shopify article response")?;

    let external_url = data.article.handle.as_ref().map(|handle| {
        format!(
            "https://{}/blogs/{}/{}",
            target.store_domain, target.blog_id, handle
        )
    });

    Ok(PublishedArticle {
        external_id: data.article.id.to_string(),
        external_url,
    })
}
