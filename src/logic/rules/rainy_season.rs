use super::Rule;
use crate::models::{Advice, AdviceCategory, CurrentWeather, Language};

/// Rainy season guidance
///
/// Conditions:
/// - Description mentions rain, drizzle or thunderstorm
///
/// Takes priority over the dry-season rule regardless of temperature.
pub struct RainySeasonRule;

impl Rule for RainySeasonRule {
    fn id(&self) -> &'static str {
        "rainy_season"
    }

    fn evaluate(&self, weather: &CurrentWeather, language: Language) -> Option<Advice> {
        if !weather.mentions_precipitation() {
            return None;
        }

        let advice = Advice::new(AdviceCategory::RainySeason);
        let advice = match language {
            Language::English => advice
                .with_line("Rainy Season: Plant suitable crops and vegetables. Ensure good drainage.")
                .with_line("Rainy Season: Monitor crops for diseases common in wet conditions."),
            Language::Luo => advice
                .with_line("Kinde koth: Pidho cham kod povrigo. Ket laro ne pi.")
                .with_line("Kinde koth: Ng'i kodi pile mondo kik two mar koth ogogi."),
        };

        Some(advice)
    }
}
