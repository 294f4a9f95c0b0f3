use super::Rule;
use crate::models::{Advice, AdviceCategory, CurrentWeather, Language};

/// Above this temperature conditions count as dry season even without sunshine
pub const DRY_SEASON_TEMP_C: f64 = 28.0;

/// Sunny/dry season guidance
///
/// Conditions:
/// - Temperature above 28°C, or
/// - Description mentions sun or clear skies
pub struct DrySeasonRule;

impl Rule for DrySeasonRule {
    fn id(&self) -> &'static str {
        "dry_season"
    }

    fn evaluate(&self, weather: &CurrentWeather, language: Language) -> Option<Advice> {
        if weather.temperature_c <= DRY_SEASON_TEMP_C && !weather.mentions_sunshine() {
            return None;
        }

        let advice = Advice::new(AdviceCategory::DrySeason);
        let advice = match language {
            Language::English => advice
                .with_line(
                    "Sunny/Dry Season: Harvest mature crops. Irrigate efficiently, preferably \
                     in the evening or early morning.",
                )
                .with_line("Sunny/Dry Season: Implement pest control measures as needed."),
            Language::Luo => advice
                .with_line("Kinde oro: Keyo cham mochek. Pwodhi kodi odhiambo kata gokinyi.")
                .with_line("Kinde oro: Bed motang' gi kute/kuodi. Tim chenro mag kweroogi."),
        };

        Some(advice)
    }
}
