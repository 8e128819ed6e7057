//! The inference adapter: turns one image plus contextual metadata into
//! structured frame tags via the vision model.
//!
//! One adapter serves both tasks, parameterized by prompt template instead of
//! duplicating near-identical types. The headline travels as an explicit call
//! parameter, so the adapter carries no per-call mutable state and calls are
//! safe to make in any order.

use std::collections::HashMap;

use crate::config::RuntimeConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::llm::{GenerateRequest, ImageInput, VisionProvider};
use crate::prompt;
use crate::roster;
use crate::types::{CaptionContext, FilteredRoster, FrameTag, PlayerRecord};

/// Bounded output-length ceiling for every generation call.
pub const MAX_NEW_TOKENS: u32 = 128;

/// Marker separating the chat template from the reply in a raw transcript.
const ASSISTANT_MARKER: &str = "assistant";

/// Which prompt template and post-processing to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// List the players visible in the photo, restricted to the roster
    Identify,
    /// Produce a one-line caption from headline + identified players
    Caption,
}

/// Tags sports photographs with player identifications or captions.
pub struct PlayerTagger {
    provider: Box<dyn VisionProvider>,
    roster: FilteredRoster,
    player_map: HashMap<String, String>,
}

impl PlayerTagger {
    /// Build a tagger from the full player list and the merged runtime config.
    ///
    /// The roster is filtered to the configured teams once, here; it is not
    /// refreshed if the backing file changes later.
    pub fn new(
        provider: Box<dyn VisionProvider>,
        players: &[PlayerRecord],
        runtime: &RuntimeConfig,
        player_map: HashMap<String, String>,
    ) -> Self {
        let roster = roster::filter_roster(players, &runtime.teams);
        tracing::debug!(
            teams = roster.len(),
            provider = provider.name(),
            "Tagger initialized"
        );
        Self {
            provider,
            roster,
            player_map,
        }
    }

    /// Tag one image. Returns exactly one full-frame tag per task.
    pub async fn tag(
        &self,
        image: &ImageInput,
        headline: &str,
        task: Task,
    ) -> PipelineResult<Vec<FrameTag>> {
        let text = match task {
            Task::Identify => self.identify(image, headline).await?,
            Task::Caption => {
                let identification = self.identify(image, headline).await?;
                let context = parse_identification_reply(&identification, &self.player_map);
                self.caption(image, headline, &context).await?
            }
        };
        Ok(vec![FrameTag::full_frame(text)])
    }

    /// The filtered roster this tagger prompts with.
    pub fn roster(&self) -> &FilteredRoster {
        &self.roster
    }

    async fn identify(&self, image: &ImageInput, headline: &str) -> PipelineResult<String> {
        let prompt = prompt::identification(headline, &self.roster);
        self.generate(image, prompt).await
    }

    async fn caption(
        &self,
        image: &ImageInput,
        headline: &str,
        context: &CaptionContext,
    ) -> PipelineResult<String> {
        let prompt = prompt::captioning(headline, context);
        self.generate(image, prompt).await
    }

    async fn generate(&self, image: &ImageInput, prompt: String) -> PipelineResult<String> {
        tracing::debug!(prompt = %prompt, "Sending prompt");
        let request = GenerateRequest {
            image: image.clone(),
            prompt,
            max_new_tokens: MAX_NEW_TOKENS,
        };
        let response = self.provider.generate(&request).await?;
        let reply = if response.transcript {
            extract_assistant_reply(&response.text)?.to_string()
        } else {
            response.text.trim().to_string()
        };
        tracing::debug!(
            model = %response.model,
            latency_ms = response.latency_ms,
            "Model replied"
        );
        Ok(reply)
    }
}

/// Recover the assistant reply from a raw decoded chat transcript.
///
/// Takes everything after the literal `assistant` role marker, trimmed. A
/// transcript without the marker is a defined failure, not silent corruption.
pub fn extract_assistant_reply(transcript: &str) -> PipelineResult<&str> {
    match transcript.split_once(ASSISTANT_MARKER) {
        Some((_, reply)) => Ok(reply.trim()),
        None => Err(PipelineError::MalformedOutput {
            message: format!("no '{ASSISTANT_MARKER}' marker in generated transcript"),
        }),
    }
}

/// Bucket an identification reply into high/low confidence player lists.
///
/// Lines labeled HIGHLY go to the high bucket, lines labeled LESS to the low
/// bucket; everything else is ignored. The player name is the text before the
/// jersey number or the confidence annotation, normalized through the player
/// map when an alias entry exists.
pub fn parse_identification_reply(
    reply: &str,
    player_map: &HashMap<String, String>,
) -> CaptionContext {
    let mut context = CaptionContext::default();
    for line in reply.lines() {
        let high = line.contains("HIGHLY");
        let low = !high && line.contains("LESS");
        if !high && !low {
            continue;
        }
        let Some(name) = player_name_from_line(line) else {
            continue;
        };
        let name = player_map.get(&name).cloned().unwrap_or(name);
        if high {
            context.high_confidence.push(name);
        } else {
            context.low_confidence.push(name);
        }
    }
    context
}

/// Pull the player name out of one prediction line.
fn player_name_from_line(line: &str) -> Option<String> {
    let mut name = line;
    // Cut the confidence annotation, then any jersey number suffix.
    for sep in [" - ", ":", "("] {
        if let Some((head, _)) = name.split_once(sep) {
            name = head;
        }
    }
    // Strip list markers like "-", "*", "1."
    let name = name
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == '-' || c == '*')
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
