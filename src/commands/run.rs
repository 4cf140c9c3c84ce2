//! One automation cycle: poll uploads, fetch transcripts, draft a blog
//! post, publish it. Every step is guarded by existence checks, so the
//! command is idempotent and safe to run from cron as often as you like.

use anyhow::Result;
use castdir_core::constants::{BRIEF_MAX_CHARS, POLL_BATCH_SIZE, TRANSCRIPT_BATCH_SIZE};
use castdir_core::genlog::{GenerationRecord, Operation};
use castdir_core::markdown::{escape_html, markdown_to_html};
use castdir_core::publishing::{Platform, PublishStatus, PublishingRecord};
use castdir_core::transcript::truncate_at_word;
use castdir_core::{ChannelVideo, Content, ContentSource, ContentType, Stage, Studio};
use tracing::{error, info, warn};

use crate::providers::claude::Claude;
use crate::providers::{shopify, youtube};

#[derive(Default)]
struct CycleSummary {
    polled: usize,
    skipped: usize,
    transcribed: usize,
    drafted: usize,
    published: usize,
}

pub async fn run(studio: &Studio) -> Result<()> {
    let client = reqwest::Client::new();
    let mut summary = CycleSummary::default();

    poll_uploads(studio, &client, &mut summary).await?;
    fetch_transcripts(studio, &client, &mut summary).await?;
    draft_blog(studio, &mut summary).await?;
    publish_blog(studio, &client, &mut summary).await?;

    println!(
        "  polled {} (skipped {}), transcribed {}, drafted {}, published {}",
        summary.polled, summary.skipped, summary.transcribed, summary.drafted, summary.published
    );
    Ok(())
}

/// Step 1: track new uploads. Each unseen video id gets a content record
/// (starting at the record stage, since it already exists on the channel)
/// plus a video record; known ids are skipped.
async fn poll_uploads(
    studio: &Studio,
    client: &reqwest::Client,
    summary: &mut CycleSummary,
) -> Result<()> {
    let api_key = std::env::var("YOUTUBE_API_KEY").ok();
    let channel_id = studio.config().channel.youtube_channel_id.clone();

    let (Some(api_key), Some(channel_id)) = (api_key, channel_id) else {
        warn!("YOUTUBE_API_KEY or channel.youtube_channel_id missing; skipping upload poll");
        return Ok(());
    };

    let uploads =
        youtube::list_recent_uploads(client, &api_key, &channel_id, POLL_BATCH_SIZE).await?;
    info!(count = uploads.len(), "fetched recent uploads");

    for upload in uploads {
        if studio.has_video(&upload.video_id) {
            summary.skipped += 1;
            continue;
        }

        let mut content = Content::new(upload.title.clone(), ContentType::Video);
        content.stage = Stage::Record;
        content.source = ContentSource::Youtube;
        content.auto_publish = true;

        let slug = match studio.create_content(&content) {
            Ok(slug) => slug,
            Err(e) => {
                error!(video_id = %upload.video_id, "failed to create content: {e}");
                continue;
            }
        };

        let mut video = ChannelVideo::new(upload.video_id, upload.title);
        video.content_id = Some(content.id);
        video.description = upload.description;
        video.published_at = upload.published_at;

        if let Err(e) = studio.save_video(&video) {
            error!(video_id = %video.video_id, "failed to record video: {e}");
            continue;
        }

        info!(video_id = %video.video_id, slug = %slug, "new upload tracked");
        summary.polled += 1;
    }

    Ok(())
}

/// Step 2: fetch captions for videos that haven't been attempted yet.
/// An empty stored transcript marks "attempted, no captions available",
/// so failed lookups aren't retried forever.
async fn fetch_transcripts(
    studio: &Studio,
    client: &reqwest::Client,
    summary: &mut CycleSummary,
) -> Result<()> {
    let pending: Vec<ChannelVideo> = studio
        .videos()?
        .into_iter()
        .filter(|video| video.transcript_pending())
        .take(TRANSCRIPT_BATCH_SIZE)
        .collect();

    for mut video in pending {
        let transcript = match youtube::fetch_transcript(client, &video.video_id).await {
            Ok(transcript) => transcript,
            Err(e) => {
                error!(video_id = %video.video_id, "transcript fetch failed: {e}");
                None
            }
        };

        let found = transcript.as_deref().is_some_and(|t| !t.is_empty());
        video.transcript = Some(transcript.unwrap_or_default());
        studio.save_video(&video)?;

        // A real transcript seeds the content brief and moves the item on.
        if found {
            if let Some(content_id) = video.content_id {
                if let Ok((slug, mut content)) = studio.find_content_by_id(content_id) {
                    content.brief = video
                        .transcript
                        .as_deref()
                        .map(|t| truncate_at_word(t, BRIEF_MAX_CHARS));
                    content.set_stage(Stage::Review);
                    studio.save_content(&slug, &content)?;
                    info!(video_id = %video.video_id, slug = %slug, "transcript stored");
                }
            }
        } else {
            info!(video_id = %video.video_id, "no captions available");
        }

        summary.transcribed += 1;
    }

    Ok(())
}

/// Step 3: draft a blog post for at most one item that has a transcript
/// but no blog body yet.
async fn draft_blog(studio: &Studio, summary: &mut CycleSummary) -> Result<()> {
    let claude = match Claude::from_env() {
        Ok(claude) => claude,
        Err(_) => {
            warn!("ANTHROPIC_API_KEY missing; skipping blog draft");
            return Ok(());
        }
    };

    let mut target = None;
    for video in studio.videos()?.into_iter().filter(|v| v.has_transcript()) {
        let Some(content_id) = video.content_id else {
            continue;
        };
        let Ok((slug, content)) = studio.find_content_by_id(content_id) else {
            continue;
        };
        if content.blog_body.is_none() {
            let transcript = video.transcript.unwrap_or_default();
            target = Some((slug, content, transcript));
            break;
        }
    }

    let Some((slug, mut content, transcript)) = target else {
        return Ok(());
    };

    let niche = content.tags.first().cloned().unwrap_or_default();
    info!(slug = %slug, "drafting blog post");

    let (draft, completion) = match claude
        .generate_blog(&content.title, &transcript, &niche)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            error!(slug = %slug, "blog generation failed: {e}");
            return Ok(());
        }
    };

    content.blog_body = Some(draft.body);
    content.seo_title = Some(draft.seo_title);
    content.seo_description = if draft.seo_description.is_empty() {
        None
    } else {
        Some(draft.seo_description)
    };
    content.target_keywords = draft.target_keywords;
    content.set_stage(Stage::Publish);
    studio.save_content(&slug, &content)?;

    studio.append_generation(
        &GenerationRecord::new(
            Operation::GenerateBlog,
            completion.model.as_str(),
            completion.input_tokens,
            completion.output_tokens,
        )
        .for_content(content.id),
    )?;

    info!(slug = %slug, "blog draft stored");
    summary.drafted += 1;
    Ok(())
}

/// Step 4: publish at most one blog-ready item to Shopify, tracking the
/// attempt through a publishing record. A failed publish stops the step
/// for this cycle rather than hammering the API.
async fn publish_blog(
    studio: &Studio,
    client: &reqwest::Client,
    summary: &mut CycleSummary,
) -> Result<()> {
    let Some(target) = shopify::ShopifyTarget::resolve(&studio.config().shopify) else {
        warn!("Shopify target not configured; skipping publish");
        return Ok(());
    };

    let candidates: Vec<_> = studio
        .contents()?
        .into_iter()
        .filter(|(_, content)| {
            content.source == ContentSource::Youtube
                && content.has_blog()
                && matches!(content.stage, Stage::Publish | Stage::Review)
        })
        .collect();

    for (slug, mut content) in candidates {
        let existing = studio.publishing_record(content.id, Platform::Shopify)?;
        if existing
            .as_ref()
            .is_some_and(|record| record.status == PublishStatus::Published)
        {
            continue;
        }

        let mut record = existing
            .unwrap_or_else(|| PublishingRecord::pending(content.id, Platform::Shopify));
        record.status = PublishStatus::Pending;
        record.error = None;
        studio.save_publishing_record(&record)?;

        let title = content
            .seo_title
            .clone()
            .unwrap_or_else(|| content.title.clone());
        let body_html = markdown_to_html(content.blog_body.as_deref().unwrap_or_default());
        let tags = if content.target_keywords.is_empty() {
            content.tags.join(", ")
        } else {
            content.target_keywords.join(", ")
        };
        let summary_html = content
            .seo_description
            .as_deref()
            .map(|description| format!("<p>{}</p>", escape_html(description)));

        let draft = shopify::ArticleDraft {
            title: &title,
            body_html,
            tags,
            summary_html,
        };

        match shopify::publish_article(client, &target, &draft).await {
            Ok(article) => {
                info!(slug = %slug, url = article.external_url.as_deref().unwrap_or("-"), "published");
                record.mark_published(article.external_id, article.external_url);
                studio.save_publishing_record(&record)?;

                content.set_stage(Stage::Distribute);
                studio.save_content(&slug, &content)?;
                summary.published += 1;
            }
            Err(e) => {
                error!(slug = %slug, "publish failed: {e}");
                record.mark_failed(&e.to_string());
                studio.save_publishing_record(&record)?;
            }
        }

        // At most one publish attempt per cycle.
        break;
    }

    Ok(())
}
