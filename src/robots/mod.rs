//! Robots.txt handling
//!
//! This module parses robots.txt content into per-agent rule sets and answers
//! allow/disallow and crawl-delay queries. A missing or unfetchable robots.txt
//! is not an error; the crawler simply proceeds without restrictions.

mod parser;

pub use parser::{RobotsRule, RobotsRuleSet};
