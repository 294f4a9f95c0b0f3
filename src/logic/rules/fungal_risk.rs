use super::Rule;
use crate::models::{Advice, AdviceCategory, CurrentWeather, Language};

pub const FUNGAL_RISK_HUMIDITY: u32 = 75;

/// Fungal disease warning
///
/// Conditions:
/// - Relative humidity above 75%
///
/// Applies on top of whichever seasonal guidance matched.
pub struct FungalRiskRule;

impl Rule for FungalRiskRule {
    fn id(&self) -> &'static str {
        "fungal_risk"
    }

    fn evaluate(&self, weather: &CurrentWeather, language: Language) -> Option<Advice> {
        if weather.humidity_percent <= FUNGAL_RISK_HUMIDITY {
            return None;
        }

        let line = match language {
            Language::English => "High humidity: Be vigilant for fungal diseases.",
            Language::Luo => "Piny obo ahinya. Ng'i kodi maber mondo two fungal kik donji.",
        };

        Some(Advice::new(AdviceCategory::FungalRisk).with_line(line))
    }
}
