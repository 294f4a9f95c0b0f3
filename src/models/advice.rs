use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdviceCategory {
    RainySeason,
    DrySeason,
    General,
    FungalRisk,
    ColdProtection,
    Fallback,
}

/// Localized advice produced by one rule; each line is rendered as a bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub category: AdviceCategory,
    pub lines: Vec<String>,
}

impl Advice {
    pub fn new(category: AdviceCategory) -> Self {
        Self {
            category,
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}
