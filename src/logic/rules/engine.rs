use super::{
    cold_protection::ColdProtectionRule, dry_season::DrySeasonRule, fungal_risk::FungalRiskRule,
    general::GeneralRule, rainy_season::RainySeasonRule, Rule,
};
use crate::models::{Advice, AdviceCategory, CurrentWeather, Language};

/// Evaluates seasonal rules first-match-wins, then stacks conditional warnings
pub struct AdviceEngine {
    seasonal: Vec<Box<dyn Rule>>,
    conditional: Vec<Box<dyn Rule>>,
}

impl AdviceEngine {
    pub fn new() -> Self {
        let seasonal: Vec<Box<dyn Rule>> = vec![
            Box::new(RainySeasonRule),
            Box::new(DrySeasonRule),
            Box::new(GeneralRule),
        ];
        let conditional: Vec<Box<dyn Rule>> =
            vec![Box::new(FungalRiskRule), Box::new(ColdProtectionRule)];

        Self::with_rules(seasonal, conditional)
    }

    pub fn with_rules(seasonal: Vec<Box<dyn Rule>>, conditional: Vec<Box<dyn Rule>>) -> Self {
        Self {
            seasonal,
            conditional,
        }
    }

    pub fn evaluate(&self, weather: &CurrentWeather, language: Language) -> Vec<Advice> {
        let mut advice: Vec<Advice> = self
            .seasonal
            .iter()
            .find_map(|rule| rule.evaluate(weather, language))
            .into_iter()
            .collect();

        for rule in &self.conditional {
            if let Some(extra) = rule.evaluate(weather, language) {
                if advice.iter().any(|a| a.category == extra.category) {
                    continue;
                }
                advice.push(extra);
            }
        }

        if advice.is_empty() {
            advice.push(fallback(language));
        }

        advice
    }

    /// Header line followed by one `- ` bullet per advice line
    pub fn render(&self, weather: &CurrentWeather, language: Language) -> String {
        let header = match language {
            Language::English => "FARMING TIPS:",
            Language::Luo => "PUONJ MAG PURO:",
        };

        let mut out = String::from(header);
        for line in self
            .evaluate(weather, language)
            .iter()
            .flat_map(|a| a.lines.iter())
        {
            out.push_str("\n- ");
            out.push_str(line);
        }
        out
    }

    pub fn list_rules(&self) -> Vec<&'static str> {
        self.seasonal
            .iter()
            .chain(self.conditional.iter())
            .map(|r| r.id())
            .collect()
    }
}

impl Default for AdviceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback(language: Language) -> Advice {
    let line = match language {
        Language::English => {
            "Practice good farming based on current conditions and your specific crop needs."
        }
        Language::Luo => "Tim pur maber kendo luw puonj mag puro mapile.",
    };
    Advice::new(AdviceCategory::Fallback).with_line(line)
}
