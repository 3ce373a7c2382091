//! The attire decision table.

use crate::model::{AttireRecommendation, Jacket, Legwear, WeatherObservation};

/// Below this temperature trousers and a windproof jacket are recommended.
pub const WARM_THRESHOLD: f64 = 20.0;

/// Maps an observation to a recommendation. Total over every input, including
/// NaN and infinite temperatures (NaN is never below the threshold).
pub fn recommend(observation: &WeatherObservation) -> AttireRecommendation {
    let umbrella = observation.is_raining();

    let (legwear, jacket) = if observation.temperature < WARM_THRESHOLD {
        (Legwear::Trousers, Jacket { waterproof: true, windproof: true })
    } else {
        (Legwear::Shorts, Jacket { waterproof: true, windproof: false })
    };

    AttireRecommendation { jacket, legwear, umbrella }
}
