// Instruction block sent to every generation provider.

use crate::profiles::PersonalizationContext;
use crate::zodiac::{SignTraits, ZodiacSign};

/// Closing instructions. Replace `{name}` before sending.
pub const INSIGHT_INSTRUCTIONS_TEMPLATE: &str = "Generate a natural, personalized insight (2-3 sentences) that:
1. Addresses {name} directly
2. Incorporates their zodiac traits naturally
3. Provides actionable, positive guidance
4. Sounds warm and authentic

Insight:";

const PROMPT_KEYWORD_LIMIT: usize = 5;

/// Everything the prompt may mention about one request.
#[derive(Debug, Clone)]
pub struct PromptInput<'a> {
    pub name: &'a str,
    pub sign: ZodiacSign,
    pub traits: SignTraits,
    pub birth_place: Option<&'a str>,
    pub base_prediction: &'a str,
    pub context_snippets: &'a [String],
    pub user_context: Option<&'a PersonalizationContext>,
}

pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let birth_place = input
        .birth_place
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("Not specified");

    let mut parts = vec![
        format!("Generate a personalized daily astrological insight for {}.", input.name),
        String::new(),
        format!("Zodiac Sign: {}", input.sign),
        format!("Traits: {}", input.traits.traits),
        format!("Element: {}", input.traits.element.as_str()),
        format!("Strengths: {}", input.traits.strengths),
        format!("Birth Place: {birth_place}"),
        String::new(),
        format!("Base Prediction: {}", input.base_prediction),
    ];

    if !input.context_snippets.is_empty() {
        parts.push(String::new());
        parts.push("Relevant Astrological Context:".to_string());
        for (i, snippet) in input.context_snippets.iter().enumerate() {
            parts.push(format!("{}. {snippet}", i + 1));
        }
    }

    if let Some(ctx) = input.user_context {
        parts.push(String::new());
        parts.push("User Preferences:".to_string());
        if let Some(style) = ctx.preferred_style.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Style: {style}"));
        }
        if let Some(length) = ctx.preferred_length.as_deref().filter(|l| !l.is_empty()) {
            parts.push(format!("Length: {length}"));
        }
        if !ctx.common_keywords.is_empty() {
            let keywords: Vec<&str> = ctx
                .common_keywords
                .iter()
                .take(PROMPT_KEYWORD_LIMIT)
                .map(String::as_str)
                .collect();
            parts.push(format!("Relevant keywords: {}", keywords.join(", ")));
        }
    }

    parts.push(String::new());
    parts.push(INSIGHT_INSTRUCTIONS_TEMPLATE.replace("{name}", input.name));

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::traits;

    fn input<'a>(snippets: &'a [String], ctx: Option<&'a PersonalizationContext>) -> PromptInput<'a> {
        PromptInput {
            name: "Ritika",
            sign: ZodiacSign::Leo,
            traits: traits(ZodiacSign::Leo),
            birth_place: Some("Jaipur"),
            base_prediction: "Test prediction",
            context_snippets: snippets,
            user_context: ctx,
        }
    }

    #[test]
    fn test_prompt_mentions_name_sign_and_place() {
        let prompt = build_prompt(&input(&[], None));
        assert!(prompt.starts_with("Generate a personalized daily astrological insight for Ritika."));
        assert!(prompt.contains("Zodiac Sign: Leo"));
        assert!(prompt.contains("Element: Fire"));
        assert!(prompt.contains("Birth Place: Jaipur"));
        assert!(prompt.contains("Base Prediction: Test prediction"));
        assert!(prompt.contains("1. Addresses Ritika directly"));
        assert!(prompt.ends_with("Insight:"));
        assert!(!prompt.contains("Relevant Astrological Context"));
        assert!(!prompt.contains("User Preferences"));
    }

    #[test]
    fn test_missing_place_is_not_specified() {
        let mut i = input(&[], None);
        i.birth_place = None;
        assert!(build_prompt(&i).contains("Birth Place: Not specified"));
    }

    #[test]
    fn test_context_snippets_are_numbered() {
        let snippets = vec!["first snippet".to_string(), "second snippet".to_string()];
        let prompt = build_prompt(&input(&snippets, None));
        assert!(prompt.contains("Relevant Astrological Context:\n1. first snippet\n2. second snippet"));
    }

    #[test]
    fn test_user_preferences_limit_keywords_to_five() {
        let ctx = PersonalizationContext {
            preferred_style: Some("spiritual".to_string()),
            preferred_length: Some("short".to_string()),
            common_keywords: (1..=8).map(|i| format!("kw{i}")).collect(),
            favorite_themes: vec![],
            request_frequency: "occasional",
        };
        let prompt = build_prompt(&input(&[], Some(&ctx)));
        assert!(prompt.contains("Style: spiritual"));
        assert!(prompt.contains("Length: short"));
        assert!(prompt.contains("Relevant keywords: kw1, kw2, kw3, kw4, kw5\n"));
        assert!(!prompt.contains("kw6"));
    }
}
