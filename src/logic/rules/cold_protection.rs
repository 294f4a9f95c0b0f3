use super::Rule;
use crate::models::{Advice, AdviceCategory, CurrentWeather, Language};

pub const COLD_PROTECTION_TEMP_C: f64 = 18.0;

/// Cold protection warning
///
/// Conditions:
/// - Temperature below 18°C
/// - No rain, drizzle or thunderstorm in the description
pub struct ColdProtectionRule;

impl Rule for ColdProtectionRule {
    fn id(&self) -> &'static str {
        "cold_protection"
    }

    fn evaluate(&self, weather: &CurrentWeather, language: Language) -> Option<Advice> {
        if weather.temperature_c >= COLD_PROTECTION_TEMP_C || weather.mentions_precipitation() {
            return None;
        }

        let line = match language {
            Language::English => "Cool weather: Protect sensitive crops from potential cold damage.",
            Language::Luo => "Piny ng'ich matin. Rit kodi moko ma yotnegi koyo.",
        };

        Some(Advice::new(AdviceCategory::ColdProtection).with_line(line))
    }
}
