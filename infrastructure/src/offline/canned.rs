use forum_application::OfflineResponseSource;
use forum_domain::Identity;
use std::collections::HashMap;

const GROK: &[&str] = &[
    "That's an interesting point. Building on that, we should consider the implications for scalability.",
    "I agree. My analysis suggests a phased approach would be most effective.",
    "Let's not forget the user experience aspect. How will this impact the end-user?",
    "A radical idea, but it might just work. We need more data to be sure.",
    "I have a slightly different perspective. What if we approached it from a security-first standpoint?",
];

const OPENAI: &[&str] = &[
    "Based on the provided context, the logical next step is to outline a clear project plan.",
    "Let's summarize the key takeaways so far. One, we need a solution. Two, it must be efficient. Three, it must be secure.",
    "Considering the previous arguments, I propose we create a proof-of-concept to test this hypothesis.",
    "It seems we have a consensus on the core problem. The solution, however, is still up for debate.",
    "From a data analysis perspective, we should prioritize the features that offer the most value to the user.",
];

const DEEPSEEK: &[&str] = &[
    "Digging deeper into the technical details, the choice of database will be critical for performance.",
    "My deep analysis of the problem suggests an underlying issue we haven't addressed yet.",
    "Let's explore the long-term maintenance costs associated with this solution.",
    "I've cross-referenced this with several case studies. The success rate is promising if we follow best practices.",
    "I recommend a thorough code review before proceeding. We need to ensure quality from the start.",
];

const ZAI: &[&str] = &[
    "Thinking outside the box, what if we leveraged machine learning to predict user behavior?",
    "A creative solution is needed here. Let's brainstorm some unconventional ideas.",
    "This problem requires a futuristic outlook. How will this solution hold up in five years?",
    "Let's pivot slightly. The real opportunity lies in the data we can collect.",
    "My predictive models indicate a high probability of success with this strategy. Let's move forward.",
];

/// Fixed table of canned lines keyed by identity.
///
/// Gemini has no built-in lines: as the default primary it is always
/// resolved directly. Lines can be added or replaced from configuration.
#[derive(Debug, Clone, Default)]
pub struct CannedResponses {
    lines: HashMap<Identity, Vec<String>>,
}

impl CannedResponses {
    pub fn builtin() -> Self {
        let table = [
            (Identity::Grok, GROK),
            (Identity::OpenAi, OPENAI),
            (Identity::DeepSeek, DEEPSEEK),
            (Identity::Zai, ZAI),
        ];
        Self {
            lines: table
                .into_iter()
                .map(|(identity, lines)| {
                    (identity, lines.iter().map(|l| l.to_string()).collect())
                })
                .collect(),
        }
    }

    /// Replace the lines of `identity`; an empty list removes it.
    pub fn with_lines(mut self, identity: Identity, lines: Vec<String>) -> Self {
        let lines: Vec<String> = lines
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect();
        if lines.is_empty() || identity.is_human() {
            self.lines.remove(&identity);
        } else {
            self.lines.insert(identity, lines);
        }
        self
    }
}

impl OfflineResponseSource for CannedResponses {
    fn lines(&self, identity: Identity) -> Option<&[String]> {
        self.lines.get(&identity).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_non_primary_identities() {
        let canned = CannedResponses::builtin();
        for identity in [Identity::Grok, Identity::OpenAi, Identity::DeepSeek, Identity::Zai] {
            assert_eq!(canned.lines(identity).map(<[String]>::len), Some(5));
        }
        assert!(!canned.has_lines(Identity::Gemini));
        assert!(!canned.has_lines(Identity::User));
    }

    #[test]
    fn test_with_lines_overrides() {
        let canned = CannedResponses::builtin()
            .with_lines(Identity::Gemini, vec!["Gemini here.".into(), "  ".into()])
            .with_lines(Identity::Zai, vec![]);
        assert_eq!(
            canned.lines(Identity::Gemini),
            Some(&["Gemini here.".to_string()][..])
        );
        assert!(!canned.has_lines(Identity::Zai));
    }
}
