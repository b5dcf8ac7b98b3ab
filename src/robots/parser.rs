//! Robots.txt parser implementation
//!
//! Parses `key: value` lines into an ordered list of per-agent rules. The
//! grammar is deliberately forgiving: blank lines, comments, and anything
//! unrecognized or malformed is skipped without complaint.

use std::time::Duration;

/// A single rule group from robots.txt, scoped to one user agent
#[derive(Debug, Clone)]
pub struct RobotsRule {
    /// The user agent this rule applies to (`*` is the default rule)
    pub agent: String,

    /// Path prefixes that are disallowed
    pub disallow: Vec<String>,

    /// Path prefixes that are allowed (these win over disallow)
    pub allow: Vec<String>,

    /// Minimum delay between requests, zero when unspecified
    pub crawl_delay: Duration,
}

impl RobotsRule {
    fn new(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            disallow: Vec::new(),
            allow: Vec::new(),
            crawl_delay: Duration::ZERO,
        }
    }
}

/// Parsed robots.txt data: an ordered list of rules plus the default rule
///
/// Loaded once at crawler construction and immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct RobotsRuleSet {
    rules: Vec<RobotsRule>,
}

impl RobotsRuleSet {
    /// Parses robots.txt content into a rule set
    ///
    /// A `User-agent:` line starts a new rule and closes the previous one.
    /// `Disallow:` and `Allow:` append non-empty path prefixes to the current
    /// rule; `Crawl-delay:` sets a floating-point seconds value. Keys are
    /// matched case-insensitively, values are trimmed.
    pub fn parse(content: &str) -> Self {
        let mut rules: Vec<RobotsRule> = Vec::new();
        let mut current: Option<RobotsRule> = None;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if let Some(rule) = current.take() {
                        rules.push(rule);
                    }
                    current = Some(RobotsRule::new(value));
                }
                "disallow" => {
                    if let Some(rule) = current.as_mut() {
                        if !value.is_empty() {
                            rule.disallow.push(value.to_string());
                        }
                    }
                }
                "allow" => {
                    if let Some(rule) = current.as_mut() {
                        if !value.is_empty() {
                            rule.allow.push(value.to_string());
                        }
                    }
                }
                "crawl-delay" => {
                    if let Some(rule) = current.as_mut() {
                        if let Ok(seconds) = value.parse::<f64>() {
                            if seconds.is_finite() && seconds >= 0.0 {
                                rule.crawl_delay = Duration::from_secs_f64(seconds);
                            }
                        }
                    }
                }
                _ => {
                    // Unrecognized directive (Sitemap, Host, ...) - ignore
                }
            }
        }

        if let Some(rule) = current.take() {
            rules.push(rule);
        }

        Self { rules }
    }

    /// Selects the rule for an agent: exact case-insensitive match first,
    /// falling back to the `*` rule
    fn rule_for(&self, agent: &str) -> Option<&RobotsRule> {
        let agent = agent.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.agent.to_lowercase() == agent)
            .or_else(|| self.rules.iter().find(|rule| rule.agent == "*"))
    }

    /// Checks whether a URL path is allowed for the given user agent
    ///
    /// Allow prefixes are checked first and win unconditionally over disallow
    /// prefixes. A bare `Disallow: /` entry blocks everything. With no
    /// applicable rule at all, everything is allowed.
    pub fn is_allowed(&self, path: &str, agent: &str) -> bool {
        let Some(rule) = self.rule_for(agent) else {
            return true;
        };

        for prefix in &rule.allow {
            if path.starts_with(prefix.as_str()) {
                return true;
            }
        }

        for prefix in &rule.disallow {
            if prefix == "/" {
                return false;
            }
            if path.starts_with(prefix.as_str()) {
                return false;
            }
        }

        true
    }

    /// Returns the crawl delay for the given user agent, zero when none is set
    pub fn crawl_delay(&self, agent: &str) -> Duration {
        self.rule_for(agent)
            .map(|rule| rule.crawl_delay)
            .unwrap_or(Duration::ZERO)
    }

    /// Returns the number of parsed rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether no rules were parsed
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
