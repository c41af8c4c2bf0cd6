//! Narration script model: style variants, request validation, prompt
//! construction and the post-processing applied to generated text.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::error::{PipelineError, Result};

pub const WORDS_PER_MINUTE: f64 = 150.0;
pub const WORDS_PER_SECOND: f64 = WORDS_PER_MINUTE / 60.0;

pub const MIN_DURATION_SECONDS: u32 = 10;
pub const MAX_DURATION_SECONDS: u32 = 1800;
pub const DEFAULT_DURATION_SECONDS: u32 = 120;

const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptStyle {
    #[default]
    Standard,
    Storytelling,
    Documentary,
    Tutorial,
    Explainer,
    CaseStudy,
    Conversational,
}

impl ScriptStyle {
    pub const ALL: [ScriptStyle; 7] = [
        Self::Standard,
        Self::Storytelling,
        Self::Documentary,
        Self::Tutorial,
        Self::Explainer,
        Self::CaseStudy,
        Self::Conversational,
    ];

    /// Short label, also the stem of the fallback title.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Storytelling => "Storytelling",
            Self::Documentary => "Documentary",
            Self::Tutorial => "Tutorial",
            Self::Explainer => "Explainer",
            Self::CaseStudy => "Case Study",
            Self::Conversational => "Conversational",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard Educational",
            Self::Storytelling => "Storytelling Narrative",
            Self::Documentary => "Documentary Style",
            Self::Tutorial => "Step-by-Step Tutorial",
            Self::Explainer => "Simplified Explainer",
            Self::CaseStudy => "Real-World Case Study",
            Self::Conversational => "Conversational Style",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Clear, educational format with structured content",
            Self::Storytelling => "Engaging narrative with characters and scenarios",
            Self::Documentary => "Professional, authoritative tone with facts",
            Self::Tutorial => "Step-by-step instructional format",
            Self::Explainer => "Simplified explanations with analogies",
            Self::CaseStudy => "Real-world examples and practical applications",
            Self::Conversational => "Natural dialogue style like talking to a friend",
        }
    }

    pub fn default_title(&self) -> String {
        format!("{} Learning Script", self.label())
    }

    fn instructions(&self) -> &'static str {
        match self {
            Self::Standard => {
                "- Open with a one-sentence overview of the topic\n\
                 - Present the main points in a logical order with clear transitions\n\
                 - Close with a short recap of the key takeaways"
            }
            Self::Storytelling => {
                "- Frame the topic as a story with a relatable character or situation\n\
                 - Build a small arc: setup, challenge, resolution\n\
                 - Weave the facts into the story instead of listing them"
            }
            Self::Documentary => {
                "- Use a calm, authoritative narrator voice\n\
                 - Lead with context and background before the details\n\
                 - Support statements with concrete facts and figures from the input"
            }
            Self::Tutorial => {
                "- Break the content into numbered, actionable steps\n\
                 - Say what the viewer will be able to do before the first step\n\
                 - End each step with what the viewer should now see or understand"
            }
            Self::Explainer => {
                "- Explain every concept in plain words a beginner understands\n\
                 - Use at least one everyday analogy for the central idea\n\
                 - Avoid jargon, or define it immediately when it is unavoidable"
            }
            Self::CaseStudy => {
                "- Anchor the topic in a realistic example or scenario\n\
                 - Describe the problem, the approach taken and the outcome\n\
                 - Draw out the general lesson the viewer can reuse"
            }
            Self::Conversational => {
                "- Talk directly to the viewer as you would to a friend\n\
                 - Use contractions, questions and a relaxed rhythm\n\
                 - Keep the facts accurate while staying informal"
            }
        }
    }
}

impl fmt::Display for ScriptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ScriptStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(|c| c.to_lowercase())
            .collect();
        match key.as_str() {
            "standard" | "1" => Ok(Self::Standard),
            "storytelling" | "2" => Ok(Self::Storytelling),
            "documentary" | "3" => Ok(Self::Documentary),
            "tutorial" | "4" => Ok(Self::Tutorial),
            "explainer" | "5" => Ok(Self::Explainer),
            "casestudy" | "6" => Ok(Self::CaseStudy),
            "conversational" | "7" => Ok(Self::Conversational),
            _ => Err(format!("unknown script style '{}'", s)),
        }
    }
}

/// Validated input for the script generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptGenerationRequest {
    input_text: String,
    style: ScriptStyle,
    duration_seconds: u32,
    custom_instructions: Option<String>,
}

impl ScriptGenerationRequest {
    pub fn new(
        input_text: impl Into<String>,
        style: ScriptStyle,
        duration_seconds: u32,
        custom_instructions: Option<String>,
    ) -> Result<Self> {
        let input_text = input_text.into().trim().to_string();
        if input_text.is_empty() {
            return Err(PipelineError::EmptyInput(
                "Input text is empty or contains only whitespace.".to_string(),
            ));
        }
        if !(MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&duration_seconds) {
            return Err(PipelineError::InvalidRequest(format!(
                "Duration must be between {} and {} seconds, got {}",
                MIN_DURATION_SECONDS, MAX_DURATION_SECONDS, duration_seconds
            )));
        }
        let custom_instructions = custom_instructions
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            input_text,
            style,
            duration_seconds,
            custom_instructions,
        })
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn style(&self) -> ScriptStyle {
        self.style
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn custom_instructions(&self) -> Option<&str> {
        self.custom_instructions.as_deref()
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds as f64 / 60.0
    }

    /// Full prompt sent to the text-generation provider.
    pub fn build_prompt(&self) -> String {
        let mut prompt = String::with_capacity(self.input_text.len() + 1024);
        prompt.push_str(
            "You are an expert educational content creator. Convert the following text into a clear, engaging video script for learning purposes.\n\n",
        );
        prompt.push_str(&format!(
            "STYLE: {} ({})\n{}\n\n",
            self.style.display_name(),
            self.style.description(),
            self.style.instructions()
        ));
        prompt.push_str(&format!(
            "LENGTH:\n{}\n\n",
            duration_guidance(self.duration_seconds)
        ));
        prompt.push_str(
            "REQUIREMENTS:\n\
             - Use conversational, clear language appropriate for video narration\n\
             - Make it engaging and easy to follow when spoken aloud\n\
             - Keep sentences concise and suitable for video pacing\n\
             - Do not include camera directions, scene descriptions, or technical video instructions\n\
             - Focus only on the spoken content that will be narrated\n\
             - Put a short title on the first line\n\n",
        );
        if let Some(extra) = &self.custom_instructions {
            prompt.push_str(&format!("ADDITIONAL INSTRUCTIONS:\n{}\n\n", extra));
        }
        prompt.push_str(&format!("INPUT TEXT:\n{}\n\n", self.input_text));
        prompt.push_str(
            "OUTPUT INSTRUCTIONS:\n\
             - Provide only the script text that should be spoken\n\
             - Use natural speech patterns and transitions\n\
             - Ensure the content flows well when read aloud\n\n\
             SCRIPT:",
        );
        prompt
    }
}

/// Generated narration, read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub content: String,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub estimated_duration_seconds: u32,
    pub style: ScriptStyle,
    pub requested_duration_seconds: u32,
}

impl Script {
    /// Normalize raw provider text into a script.
    pub fn from_generated_text(raw: &str, request: &ScriptGenerationRequest) -> Result<Self> {
        let content = clean_script_text(raw)?;
        if content.is_empty() {
            return Err(PipelineError::EmptyResponse(
                "Generated script is empty after cleanup".to_string(),
            ));
        }
        let title = derive_title(&content, request.style());
        let estimated_duration_seconds = estimate_duration_seconds(&content);

        Ok(Self {
            content,
            title,
            generated_at: Utc::now(),
            estimated_duration_seconds,
            style: request.style(),
            requested_duration_seconds: request.duration_seconds(),
        })
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    pub fn requested_minutes(&self) -> f64 {
        self.requested_duration_seconds as f64 / 60.0
    }

    pub fn estimated_minutes(&self) -> f64 {
        self.estimated_duration_seconds as f64 / 60.0
    }

    /// First `max_chars` characters, with an ellipsis when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let cut: String = self.content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Target word count for a duration: `round(seconds * 2.5)`.
pub fn word_budget(duration_seconds: u32) -> u32 {
    (duration_seconds as f64 * WORDS_PER_SECOND).round() as u32
}

pub fn duration_guidance(duration_seconds: u32) -> String {
    let minutes = duration_seconds / 60;
    let seconds = duration_seconds % 60;
    let spoken = match (minutes, seconds) {
        (0, s) => format!("{} seconds", s),
        (m, 0) => format!("{} minute{}", m, if m == 1 { "" } else { "s" }),
        (m, s) => format!("{} minute{} {} seconds", m, if m == 1 { "" } else { "s" }, s),
    };
    format!(
        "- Create a script for a {} educational video\n\
         - Aim for approximately {} words (speaking rate of {} words per minute)\n\
         - Do not run noticeably shorter or longer than that",
        spoken,
        word_budget(duration_seconds),
        WORDS_PER_MINUTE as u32
    )
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Spoken length in seconds: `ceil(words / 2.5)`.
pub fn estimate_duration_seconds(text: &str) -> u32 {
    (word_count(text) as f64 / WORDS_PER_SECOND).ceil() as u32
}

fn heading_regex() -> Result<&'static Regex> {
    static HEADING_RE: OnceCell<Regex> = OnceCell::new();
    HEADING_RE.get_or_try_init(|| {
        Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").map_err(|e| {
            PipelineError::InvalidRequest(format!("failed to compile heading regex: {}", e))
        })
    })
}

/// Strip markdown emphasis and heading markers.
pub fn clean_script_text(raw: &str) -> Result<String> {
    let text = raw.trim().replace("**", "").replace('*', "");
    let text = heading_regex()?.replace_all(&text, "");
    Ok(text.trim().to_string())
}

/// First non-empty line when shorter than 100 characters, else the style title.
pub fn derive_title(content: &str, style: ScriptStyle) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .filter(|l| l.chars().count() < MAX_TITLE_CHARS)
        .map(str::to_string)
        .unwrap_or_else(|| style.default_title())
}
