pub mod cold_protection;
pub mod dry_season;
pub mod engine;
pub mod fungal_risk;
pub mod general;
pub mod rainy_season;

pub use engine::AdviceEngine;

use crate::models::{Advice, CurrentWeather, Language};

/// Trait for farming advice rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Evaluate the rule and return localized advice if conditions are met
    fn evaluate(&self, weather: &CurrentWeather, language: Language) -> Option<Advice>;
}
