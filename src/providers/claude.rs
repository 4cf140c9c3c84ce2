//! Anthropic Messages API wrapper for content generation.
//!
//! One request per operation, no streaming, no tool use. Prompt design
//! stays here; callers get back parsed drafts plus token usage for the
//! generation log.

use anyhow::{bail, Context, Result};
use castdir_core::config::CreatorProfile;
use castdir_core::constants::BLOG_TRANSCRIPT_MAX_CHARS;
use castdir_core::transcript::truncate_at_word;
use serde::{Deserialize, Serialize};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-sonnet-4-5-20250929";

pub struct Claude {
    client: reqwest::Client,
    api_key: String,
}

/// A single completion with its token accounting.
pub struct Completion {
    pub text: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Inputs for a round of title generation.
pub struct TitleRequest {
    pub count: usize,
    pub video_style: String,
    pub target_duration_minutes: Option<u32>,
    pub topic_override: Option<String>,
}

/// Blog draft with the SEO fields pulled out of the markdown.
pub struct BlogDraft {
    pub body: String,
    pub seo_title: String,
    pub seo_description: String,
    pub target_keywords: Vec<String>,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

impl Claude {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY not configured")?;

        Ok(Claude {
            client: reqwest::Client::new(),
            api_key,
        })
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: Option<f32>,
    ) -> Result<Completion> {
        let request = MessagesRequest {
            model: MODEL,
            max_tokens,
            temperature,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .context("Anthropic API request failed")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            bail!("Anthropic API error {}: {}", status, body);
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).context("Failed to parse Anthropic API response")?;

        let text = parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default();
        if text.is_empty() {
            bail!("Model response contained no text");
        }

        Ok(Completion {
            text,
            model: parsed.model,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
        })
    }

    /// Generate video title ideas as a plain list of strings.
    pub async fn generate_titles(
        &self,
        profile: &CreatorProfile,
        request: &TitleRequest,
    ) -> Result<(Vec<String>, Completion)> {
        let system = "You are a YouTube title strategist. You generate high-converting video titles that optimize for click-through rate and viewer retention.\n\nRules:\n- Titles must feel genuine, not spammy clickbait.\n- Use curiosity gaps, specificity, and emotional triggers.\n- Keep titles under 70 characters when possible.\n- Vary sentence structures across titles.\n- Return ONLY a valid JSON array of strings. No markdown, no explanation, no code fences.";

        let mut user = format!(
            "Generate exactly {count} YouTube video title ideas.\n\n\
            Creator context:\n\
            - Niche: {niche}\n\
            - Channel goal: {goal}\n\
            - Tone: {tone}\n\
            - Audience: {audience}\n\
            - Video style: {style}",
            count = request.count,
            niche = profile.niche,
            goal = profile.channel_goal,
            tone = non_empty(&profile.tone, "engaging and authentic"),
            audience = non_empty(&profile.audience, "general"),
            style = request.video_style.replace('_', " "),
        );
        if let Some(minutes) = request.target_duration_minutes {
            user.push_str(&format!("\n- Target duration: {} minutes", minutes));
        }
        if let Some(topic) = &request.topic_override {
            user.push_str(&format!("\n- Specific topic: {}", topic));
        }
        user.push_str(&format!(
            "\n\nReturn a JSON array of exactly {} title strings. Example format:\n\
            [\"Title One\",\"Title Two\",\"Title Three\"]",
            request.count
        ));

        let completion = self.complete(system, &user, 1024, Some(0.9)).await?;
        let titles = parse_title_array(&completion.text, request.count)?;
        Ok((titles, completion))
    }

    /// Repurpose a video transcript into an SEO blog draft.
    pub async fn generate_blog(
        &self,
        video_title: &str,
        transcript: &str,
        niche: &str,
    ) -> Result<(BlogDraft, Completion)> {
        let system = "You are an expert SEO content writer. You repurpose video transcripts into high-quality blog posts optimized for search engines. Your output is structured, scannable, and valuable to readers who prefer reading over watching. Always output valid markdown.";

        let mut user = format!(
            "Repurpose this video transcript into an SEO-optimized blog post.\n\n\
            Video title: {}\n",
            video_title
        );
        if !niche.is_empty() {
            user.push_str(&format!("Topic/Niche: {}\n", niche));
        }
        user.push_str(&format!(
            "\nTranscript:\n---\n{}\n---\n\n\
            Generate the following as a single markdown document:\n\n\
            1. Start with an SEO title on the first line as a markdown H1 (max 70 characters)\n\
            2. On the next line, write a meta description in italics (max 160 characters)\n\
            3. On the next line, write keywords as a comma-separated list in bold (5-10 keywords)\n\
            4. Then write the blog post with:\n   \
            - A short TL;DR summary (2-3 sentences) right after the intro\n   \
            - Clear H2/H3 headings for scannable structure\n   \
            - Short paragraphs (2-3 sentences max)\n   \
            - Concrete examples and actionable advice from the transcript\n   \
            - A \"Key Takeaways\" section near the bottom with 4-6 bullet points\n   \
            - A brief conclusion\n\n\
            Do NOT include \"transcript\", \"video\", or \"watch\" references — write as a standalone blog post.",
            truncate_at_word(transcript, BLOG_TRANSCRIPT_MAX_CHARS)
        ));

        let completion = self.complete(system, &user, 4096, None).await?;
        let draft = parse_blog_draft(&completion.text, video_title);
        Ok((draft, completion))
    }

    /// Draft a full video script from a title and optional brief.
    pub async fn generate_script(
        &self,
        title: &str,
        brief: Option<&str>,
        target_duration_minutes: Option<u32>,
        profile: &CreatorProfile,
    ) -> Result<Completion> {
        let system = "You are a high-level YouTube script strategist. You optimize for retention, curiosity gaps, open loops, escalation, strategic re-hooks, emotional pacing, and strong CTAs.\n\nFollow the structural blueprint proportionally: allocate depth based on section weights, scale output to the target duration, and never artificially compress the script. Output the script as plain markdown with section headings.";

        // Default blueprint when no duration-specific one applies.
        let blueprint = r#"{"sections":[{"key":"hook","weight":0.15},{"key":"setup","weight":0.15},{"key":"core","weight":0.4},{"key":"payoff","weight":0.2},{"key":"cta","weight":0.1}]}"#;

        let mut user = format!(
            "Blueprint (JSON):\n{}\n\n\
            Style: write in a clear, engaging, high-retention style.\n\n\
            Creator context:\n\
            - Niche: {}\n\
            - Tone: {}\n\
            - Audience: {}\n\n\
            Video title: {}",
            blueprint,
            profile.niche,
            non_empty(&profile.tone, "engaging and authentic"),
            non_empty(&profile.audience, "general"),
            title,
        );
        if let Some(minutes) = target_duration_minutes {
            user.push_str(&format!("\nTarget duration: {} minutes", minutes));
        }
        if let Some(brief) = brief {
            user.push_str(&format!("\n\nBrief / research notes:\n{}", brief));
        }

        self.complete(system, &user, 4096, Some(0.7)).await
    }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Parse the model's response as a JSON string array, falling back to the
/// outermost bracketed span when the model wraps it in prose.
fn parse_title_array(text: &str, count: usize) -> Result<Vec<String>> {
    let trimmed = text.trim();

    if let Ok(titles) = serde_json::from_str::<Vec<String>>(trimmed) {
        return Ok(titles.into_iter().take(count).collect());
    }

    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if end > start {
            if let Ok(titles) = serde_json::from_str::<Vec<String>>(&trimmed[start..=end]) {
                return Ok(titles.into_iter().take(count).collect());
            }
        }
    }

    bail!("Model returned an invalid title list")
}

/// Pull SEO fields out of the generated markdown: the first H1 becomes
/// the title, the first italic line the meta description, the first bold
/// comma list the keywords. Missing pieces fall back gracefully.
fn parse_blog_draft(text: &str, fallback_title: &str) -> BlogDraft {
    let lines: Vec<&str> = text.lines().collect();

    let seo_title = lines
        .iter()
        .find(|l| l.starts_with("# "))
        .map(|l| cap_chars(l.trim_start_matches("# ").trim(), 70))
        .unwrap_or_else(|| cap_chars(fallback_title, 70));

    let seo_description = lines
        .iter()
        .find(|l| is_italic_line(l))
        .map(|l| cap_chars(l.trim_matches(|c| c == '*' || c == '_').trim(), 160))
        .unwrap_or_default();

    let target_keywords = lines
        .iter()
        .find(|l| l.starts_with("**") && l.contains(','))
        .map(|l| {
            let inner = l.trim_matches('*');
            let inner = strip_keywords_label(inner);
            inner
                .split(',')
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .take(10)
                .collect()
        })
        .unwrap_or_default();

    BlogDraft {
        body: text.to_string(),
        seo_title,
        seo_description,
        target_keywords,
    }
}

fn is_italic_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    (bytes.first() == Some(&b'*') && bytes.get(1) != Some(&b'*'))
        || (bytes.first() == Some(&b'_') && bytes.get(1) != Some(&b'_'))
}

fn strip_keywords_label(text: &str) -> &str {
    let trimmed = text.trim();
    for label in ["Keywords:", "keywords:", "KEYWORDS:"] {
        if let Some(rest) = trimmed.strip_prefix(label) {
            return rest.trim();
        }
    }
    trimmed
}

fn cap_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_array_plain_json() {
        let titles = parse_title_array(r#"["One","Two","Three"]"#, 2).unwrap();
        assert_eq!(titles, ["One", "Two"]);
    }

    #[test]
    fn test_title_array_wrapped_in_prose() {
        let text = "Here are your titles:\n[\"One\", \"Two\"]\nEnjoy!";
        let titles = parse_title_array(text, 10).unwrap();
        assert_eq!(titles, ["One", "Two"]);
    }

    #[test]
    fn test_title_array_rejects_garbage() {
        assert!(parse_title_array("no titles here", 5).is_err());
        assert!(parse_title_array("[1, 2, 3]", 5).is_err());
    }

    #[test]
    fn test_blog_draft_extracts_seo_fields() {
        let md = "# How to Sharpen Chisels\n\
            *A practical guide to razor-sharp edges in ten minutes.*\n\
            **Keywords: sharpening, chisels, woodworking, honing**\n\n\
            Intro paragraph.\n\n## Steps\n\n- one\n- two";

        let draft = parse_blog_draft(md, "fallback");
        assert_eq!(draft.seo_title, "How to Sharpen Chisels");
        assert_eq!(
            draft.seo_description,
            "A practical guide to razor-sharp edges in ten minutes."
        );
        assert_eq!(
            draft.target_keywords,
            ["sharpening", "chisels", "woodworking", "honing"]
        );
        assert!(draft.body.starts_with("# How to Sharpen"));
    }

    #[test]
    fn test_blog_draft_falls_back_to_video_title() {
        let draft = parse_blog_draft("Just a paragraph.", "Original Title");
        assert_eq!(draft.seo_title, "Original Title");
        assert!(draft.seo_description.is_empty());
        assert!(draft.target_keywords.is_empty());
    }
}
