use super::Rule;
use crate::models::{Advice, AdviceCategory, CurrentWeather, Language};

/// Catch-all guidance when neither rainy nor dry conditions apply
pub struct GeneralRule;

impl Rule for GeneralRule {
    fn id(&self) -> &'static str {
        "general"
    }

    fn evaluate(&self, _weather: &CurrentWeather, language: Language) -> Option<Advice> {
        let line = match language {
            Language::English => {
                "General Conditions: Maintain your farm. Follow your planting and harvesting schedule."
            }
            Language::Luo => {
                "Tim pur motegno. Luw chenro mar puro ni mondo iyud keyo mang'eny."
            }
        };

        Some(Advice::new(AdviceCategory::General).with_line(line))
    }
}
