//! UI translation tables for the three supported display languages

use crate::models::DisplayLanguage;

/// Strings consumed by the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct Translations {
    pub loading: &'static str,
    pub select_location: &'static str,
    pub geolocating: &'static str,
    pub no_data: &'static str,

    pub humidity: &'static str,
    pub pressure: &'static str,
    pub wind: &'static str,
    pub visibility: &'static str,
    pub precipitation: &'static str,
    pub air_quality: &'static str,

    // AQI band labels and severity descriptions
    pub aqi_good: &'static str,
    pub aqi_fair: &'static str,
    pub aqi_moderate: &'static str,
    pub aqi_poor: &'static str,
    pub aqi_very_poor: &'static str,
    pub aqi_excellent_desc: &'static str,
    pub aqi_acceptable_desc: &'static str,
    pub aqi_sensitive_desc: &'static str,
    pub aqi_unhealthy_desc: &'static str,
    pub aqi_dangerous_desc: &'static str,

    pub rain: &'static str,
    pub snow: &'static str,
    pub intensity_light: &'static str,
    pub intensity_moderate: &'static str,
    pub intensity_heavy: &'static str,

    pub fog: &'static str,
    pub hail: &'static str,
    pub thunderstorm: &'static str,

    pub forecast_title: &'static str,
    pub today: &'static str,
}

static FR: Translations = Translations {
    loading: "Chargement...",
    select_location: "Sélectionnez un lieu sur la carte",
    geolocating: "Géolocalisation...",
    no_data: "Aucune donnée disponible",
    humidity: "Humidité",
    pressure: "Pression",
    wind: "Vent",
    visibility: "Visibilité",
    precipitation: "Précipitations",
    air_quality: "Qualité de l'air",
    aqi_good: "Bon",
    aqi_fair: "Correct",
    aqi_moderate: "Modéré",
    aqi_poor: "Mauvais",
    aqi_very_poor: "Très mauvais",
    aqi_excellent_desc: "Qualité de l'air excellente",
    aqi_acceptable_desc: "Qualité de l'air acceptable",
    aqi_sensitive_desc: "Sensible aux personnes fragiles",
    aqi_unhealthy_desc: "Mauvais pour la santé",
    aqi_dangerous_desc: "Dangereux pour la santé",
    rain: "Pluie",
    snow: "Neige",
    intensity_light: "Faible",
    intensity_moderate: "Modérée",
    intensity_heavy: "Forte",
    fog: "Brouillard",
    hail: "Grêle",
    thunderstorm: "Orage",
    forecast_title: "Prévisions 7 jours",
    today: "Aujourd'hui",
};

static EN: Translations = Translations {
    loading: "Loading...",
    select_location: "Select a location on the map",
    geolocating: "Locating...",
    no_data: "No data available",
    humidity: "Humidity",
    pressure: "Pressure",
    wind: "Wind",
    visibility: "Visibility",
    precipitation: "Precipitation",
    air_quality: "Air Quality",
    aqi_good: "Good",
    aqi_fair: "Fair",
    aqi_moderate: "Moderate",
    aqi_poor: "Poor",
    aqi_very_poor: "Very Poor",
    aqi_excellent_desc: "Excellent air quality",
    aqi_acceptable_desc: "Acceptable air quality",
    aqi_sensitive_desc: "Sensitive groups affected",
    aqi_unhealthy_desc: "Unhealthy",
    aqi_dangerous_desc: "Hazardous",
    rain: "Rain",
    snow: "Snow",
    intensity_light: "Light",
    intensity_moderate: "Moderate",
    intensity_heavy: "Heavy",
    fog: "Fog",
    hail: "Hail",
    thunderstorm: "Thunderstorm",
    forecast_title: "7-day forecast",
    today: "Today",
};

static ES: Translations = Translations {
    loading: "Cargando...",
    select_location: "Selecciona un lugar en el mapa",
    geolocating: "Geolocalizando...",
    no_data: "No hay datos disponibles",
    humidity: "Humedad",
    pressure: "Presión",
    wind: "Viento",
    visibility: "Visibilidad",
    precipitation: "Precipitaciones",
    air_quality: "Calidad del aire",
    aqi_good: "Buena",
    aqi_fair: "Aceptable",
    aqi_moderate: "Moderada",
    aqi_poor: "Mala",
    aqi_very_poor: "Muy mala",
    aqi_excellent_desc: "Calidad del aire excelente",
    aqi_acceptable_desc: "Calidad del aire aceptable",
    aqi_sensitive_desc: "Sensible para personas frágiles",
    aqi_unhealthy_desc: "Perjudicial para la salud",
    aqi_dangerous_desc: "Peligroso para la salud",
    rain: "Lluvia",
    snow: "Nieve",
    intensity_light: "Débil",
    intensity_moderate: "Moderada",
    intensity_heavy: "Fuerte",
    fog: "Niebla",
    hail: "Granizo",
    thunderstorm: "Tormenta",
    forecast_title: "Previsión 7 días",
    today: "Hoy",
};

/// Translation table for the given language
pub fn translations(lang: DisplayLanguage) -> &'static Translations {
    match lang {
        DisplayLanguage::Fr => &FR,
        DisplayLanguage::En => &EN,
        DisplayLanguage::Es => &ES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_language_has_its_table() {
        assert_eq!(translations(DisplayLanguage::Fr).today, "Aujourd'hui");
        assert_eq!(translations(DisplayLanguage::En).today, "Today");
        assert_eq!(translations(DisplayLanguage::Es).today, "Hoy");
    }
}
