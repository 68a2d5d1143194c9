//! Keyword classifier that maps a free-text prompt to a canned artifact.
//!
//! Rules are tried in priority order and the first whose keyword set hits
//! the lower-cased prompt wins. Prompts that match nothing fall through to
//! the default template, which echoes the prompt back.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::template::TemplateId;

/// The bundled result of classifying one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub template: TemplateId,
    pub chat_message: String,
    pub source_code: String,
    pub html: Option<String>,
}

/// One keyword rule: any keyword contained in the prompt selects `template`
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub template: TemplateId,
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Rules in priority order. The default template is not listed: it is what
/// remains when none of these match.
pub const RULES: &[Rule] = &[
    Rule {
        template: TemplateId::Website,
        keywords: &["website", "webpage", "html"],
    },
    Rule {
        template: TemplateId::Button,
        keywords: &["button"],
    },
    Rule {
        template: TemplateId::Card,
        keywords: &["card"],
    },
];

/// How much of an artifact's HTML reaches the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFlow {
    /// Only website prompts produce HTML
    Simplified,
    /// Every template carries its HTML fragment
    #[default]
    Extended,
}

impl ArtifactFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactFlow::Simplified => "simplified",
            ArtifactFlow::Extended => "extended",
        }
    }
}

impl FromStr for ArtifactFlow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simplified" => Ok(ArtifactFlow::Simplified),
            "extended" => Ok(ArtifactFlow::Extended),
            _ => Err(format!("unknown flow '{}' (expected simplified or extended)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    flow: ArtifactFlow,
}

impl Classifier {
    pub fn new(flow: ArtifactFlow) -> Self {
        Self { flow }
    }

    pub fn flow(&self) -> ArtifactFlow {
        self.flow
    }

    /// First rule whose keywords appear in the prompt, ignoring case
    pub fn matching_rule(prompt: &str) -> Option<&'static Rule> {
        let lowered = prompt.to_lowercase();
        RULES.iter().find(|rule| rule.matches(&lowered))
    }

    pub fn template_for(prompt: &str) -> TemplateId {
        Self::matching_rule(prompt)
            .map(|rule| rule.template)
            .unwrap_or(TemplateId::Default)
    }

    /// Total over all inputs: every prompt yields exactly one artifact.
    pub fn classify(&self, prompt: &str) -> GeneratedArtifact {
        let id = Self::template_for(prompt);
        let mut artifact = id.template().instantiate(prompt);

        if self.flow == ArtifactFlow::Simplified && id != TemplateId::Website {
            artifact.html = None;
        }

        tracing::debug!(
            template = id.as_str(),
            flow = self.flow.as_str(),
            has_html = artifact.html.is_some(),
            "classified prompt"
        );
        artifact
    }
}

/// Classify with the extended flow
pub fn classify(prompt: &str) -> GeneratedArtifact {
    Classifier::default().classify(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_keywords_any_case() {
        for prompt in ["make me a website", "A WebPage please", "some HTML", "WEBSITE"] {
            let artifact = classify(prompt);
            assert_eq!(artifact.template, TemplateId::Website, "prompt: {}", prompt);
            assert!(artifact.html.as_deref().is_some_and(|h| !h.is_empty()));
        }
    }

    #[test]
    fn test_website_beats_button_and_card() {
        assert_eq!(classify("a card and a button on a website").template, TemplateId::Website);
        assert_eq!(classify("html card").template, TemplateId::Website);
    }

    #[test]
    fn test_button_beats_card() {
        let artifact = classify("a Button inside a card");
        assert_eq!(artifact.template, TemplateId::Button);
        assert!(artifact.source_code.contains("export default Button"));
    }

    #[test]
    fn test_card() {
        let artifact = classify("profile CARD");
        assert_eq!(artifact.template, TemplateId::Card);
        assert!(artifact.source_code.contains("export default Card"));
        assert_eq!(artifact.chat_message, "Here's a sleek card component!");
    }

    #[test]
    fn test_default_echoes_prompt_verbatim() {
        let prompt = "a <b>navbar</b> with \"quotes\"";
        let artifact = classify(prompt);
        assert_eq!(artifact.template, TemplateId::Default);
        assert!(artifact.chat_message.contains(prompt));
        assert!(artifact.source_code.contains(prompt));
        assert!(artifact.source_code.contains("export default MyComponent"));
    }

    #[test]
    fn test_empty_prompt_is_default() {
        let artifact = classify("");
        assert_eq!(artifact.template, TemplateId::Default);
    }

    #[test]
    fn test_idempotent() {
        for prompt in ["website", "button", "card", "anything else"] {
            assert_eq!(classify(prompt), classify(prompt));
        }
    }

    #[test]
    fn test_button_html_depends_on_flow() {
        let simplified = Classifier::new(ArtifactFlow::Simplified).classify("give me a button");
        assert!(simplified.html.is_none());
        assert!(simplified.source_code.contains("export default Button"));

        let extended = Classifier::new(ArtifactFlow::Extended).classify("give me a button");
        let html = extended.html.expect("extended flow keeps button html");
        assert!(html.contains("linear-gradient(135deg, #667eea 0%, #764ba2 100%)"));
    }

    #[test]
    fn test_simplified_flow_keeps_website_html() {
        let artifact = Classifier::new(ArtifactFlow::Simplified).classify("make me a website");
        assert!(artifact.html.is_some());
    }

    #[test]
    fn test_matching_rule() {
        assert!(Classifier::matching_rule("nothing here").is_none());
        let rule = Classifier::matching_rule("my webpage").unwrap();
        assert_eq!(rule.template, TemplateId::Website);
    }

    #[test]
    fn test_flow_from_str() {
        assert_eq!("Simplified".parse::<ArtifactFlow>(), Ok(ArtifactFlow::Simplified));
        assert_eq!("extended".parse::<ArtifactFlow>(), Ok(ArtifactFlow::Extended));
        assert!("other".parse::<ArtifactFlow>().unwrap_err().contains("unknown flow 'other'"));
    }
}
