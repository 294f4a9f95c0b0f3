//! User-facing screen text in every supported language.

use crate::models::{CurrentWeather, Language};

pub fn language_menu() -> String {
    "Select Language / Yer Dhok:\n1. English\n2. Dholuo\n0. Exit / Wuok".to_string()
}

/// Language is not known yet, so the annotation is English only
pub fn language_menu_invalid() -> String {
    format!("Invalid selection. Please try again.\n\n{}", language_menu())
}

pub fn main_menu(language: Language, location: &str) -> String {
    match language {
        Language::English => format!(
            "Main Menu ({}):\n1. Today's Weather\n2. 3-Day Forecast\n3. Farming Tips\n0. Exit",
            location
        ),
        Language::Luo => format!(
            "Meny mar Loch ({}):\n1. Nen Piny Kawuono\n2. Nen Piny Ndege Adek\n3. Puonj mag Puro\n0. Wuok",
            location
        ),
    }
}

pub fn main_menu_invalid(language: Language, location: &str) -> String {
    let annotation = match language {
        Language::English => "Invalid selection. Try again.",
        Language::Luo => "Tic mogo. Tem kendo.",
    };
    format!("{}\n\n{}", annotation, main_menu(language, location))
}

pub fn back_option(language: Language) -> &'static str {
    match language {
        Language::English => "0. Main Menu",
        Language::Luo => "0. Wuok",
    }
}

pub fn weather_error(language: Language) -> &'static str {
    match language {
        Language::English => "Error getting weather data.",
        Language::Luo => "Tye bal e neno piny.",
    }
}

pub fn tips_error(language: Language) -> &'static str {
    match language {
        Language::English => "Error getting weather data.",
        Language::Luo => "Tye bal ka yudo wach piny.",
    }
}

pub fn forecast_error(language: Language) -> &'static str {
    match language {
        Language::English => "Error getting forecast data.",
        Language::Luo => "Tye bal e yudo wach piny ma odiechieng.",
    }
}

pub fn forecast_heading(language: Language, location: &str) -> String {
    match language {
        Language::English => format!("3-Day Forecast ({}):", location),
        Language::Luo => format!("Piny Ndege Adek ({}):", location),
    }
}

pub fn no_forecast_data(language: Language) -> &'static str {
    match language {
        Language::English => "No forecast data available.",
        Language::Luo => "Dongruok mar piny onge.",
    }
}

/// Current-conditions block, one reading per line, wind only when reported
pub fn weather_report(language: Language, location: &str, weather: &CurrentWeather) -> String {
    let (heading, temp, conditions, humidity, wind) = match language {
        Language::English => (
            format!("Weather in {} Today:", location),
            "Temperature",
            "Conditions",
            "Humidity",
            "Wind",
        ),
        Language::Luo => (
            format!("Piny e {} Kawuono:", location),
            "Liet",
            "Kit Piny",
            "Um",
            "Yamo",
        ),
    };

    let mut report = format!(
        "{}\n{}: {}°C\n{}: {}\n{}: {}%",
        heading,
        temp,
        weather.temperature_c,
        conditions,
        weather.description,
        humidity,
        weather.humidity_percent
    );
    if let Some(speed) = weather.wind_speed_ms {
        report.push_str(&format!("\n{}: {} m/s", wind, speed));
    }
    report
}

pub fn goodbye(language: Language) -> &'static str {
    match language {
        Language::English => "Thank you for using Farmer Weather Service!",
        Language::Luo => "Aparo pi tiyo kodwa. Med ameda maber!",
    }
}

pub fn technical_error() -> &'static str {
    "A technical error occurred. Please try again later."
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn main_menu_names_location() {
        assert!(main_menu(Language::English, "Lira").starts_with("Main Menu (Lira):"));
        assert!(main_menu(Language::Luo, "Lira").starts_with("Meny mar Loch (Lira):"));
    }

    #[test]
    fn invalid_main_menu_keeps_language() {
        let luo = main_menu_invalid(Language::Luo, "Gulu");
        assert!(luo.starts_with("Tic mogo. Tem kendo.\n\nMeny mar Loch"));
    }

    #[test]
    fn weather_report_omits_missing_wind() {
        let mut weather = CurrentWeather {
            temperature_c: 23.04,
            description: "few clouds".into(),
            humidity_percent: 64,
            wind_speed_ms: None,
            observed_at: Utc::now(),
        };
        let report = weather_report(Language::English, "Gulu", &weather);
        assert_eq!(
            report,
            "Weather in Gulu Today:\nTemperature: 23.04°C\nConditions: few clouds\nHumidity: 64%"
        );

        weather.wind_speed_ms = Some(4.12);
        let report = weather_report(Language::Luo, "Gulu", &weather);
        assert!(report.starts_with("Piny e Gulu Kawuono:\nLiet: 23.04°C"));
        assert!(report.ends_with("\nYamo: 4.12 m/s"));
    }
}
