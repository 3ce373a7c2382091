use serde::Serialize;

/// Condition label reported by weather sources when it is raining.
pub const RAIN: &str = "Rain";

/// What a weather source observed for a location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub condition: String,
    pub temperature: f64,
}

impl WeatherObservation {
    pub fn new(condition: impl Into<String>, temperature: f64) -> Self {
        Self { condition: condition.into(), temperature }
    }

    pub fn is_raining(&self) -> bool {
        self.condition == RAIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Jacket {
    pub waterproof: bool,
    pub windproof: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Legwear {
    Trousers,
    Shorts,
}

impl Legwear {
    pub fn as_str(&self) -> &'static str {
        match self {
            Legwear::Trousers => "trousers",
            Legwear::Shorts => "shorts",
        }
    }
}

impl std::fmt::Display for Legwear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended attire. Serialized with the wire field names of `GET /v1/weather`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttireRecommendation {
    #[serde(rename = "Jacket")]
    pub jacket: Jacket,
    #[serde(rename = "Pants")]
    pub legwear: Legwear,
    #[serde(rename = "Umbrella")]
    pub umbrella: bool,
}

impl std::fmt::Display for AttireRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let jacket = if self.jacket.windproof { "waterproof, windproof" } else { "waterproof" };
        let umbrella = if self.umbrella { "yes" } else { "no" };
        write!(f, "jacket: {jacket}; pants: {}; umbrella: {umbrella}", self.legwear)
    }
}
