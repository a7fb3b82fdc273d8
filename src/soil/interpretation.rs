//! Agronomic interpretation text for pH, organic carbon and macro-nutrients
//!
//! Interpretations depend only on the measured value, not on the catalog range.

use super::property::SoilProperty;

/// pH bands, upper bound exclusive
const PH_BANDS: [(f64, &str); 9] = [
    (4.5, "Extremely acidic - May need significant liming"),
    (5.0, "Very acidic - Consider liming"),
    (5.5, "Moderately acidic - May need some liming"),
    (6.0, "Slightly acidic - Generally acceptable"),
    (6.5, "Slightly acidic to neutral - Good range"),
    (7.0, "Neutral - Ideal for most plants"),
    (7.5, "Slightly alkaline - Good range"),
    (8.0, "Moderately alkaline - May need acidification"),
    (8.5, "Very alkaline - Consider acidification"),
];

const PH_TOP: &str = "Extremely alkaline - May need significant acidification";

const ORGANIC_CARBON_BANDS: [(f64, &str); 4] = [
    (1.0, "Very low - Consider adding organic matter"),
    (2.0, "Low - Could benefit from organic amendments"),
    (3.0, "Moderate - Good for most crops"),
    (4.0, "Good - Excellent for most crops"),
];

const ORGANIC_CARBON_TOP: &str = "Very good - Ideal for most crops";

fn banded(value: f64, bands: &[(f64, &'static str)], top: &'static str) -> &'static str {
    bands
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, text)| *text)
        .unwrap_or(top)
}

pub fn ph_interpretation(ph: f64) -> &'static str {
    banded(ph, &PH_BANDS, PH_TOP)
}

pub fn organic_carbon_interpretation(oc: f64) -> &'static str {
    banded(oc, &ORGANIC_CARBON_BANDS, ORGANIC_CARBON_TOP)
}

/// N/P/K level text; `None` for anything that is not a macro-nutrient
pub fn nutrient_interpretation(property: SoilProperty, value: f64) -> Option<&'static str> {
    // (low threshold, high threshold, low, moderate, high)
    let (low, high, texts) = match property {
        SoilProperty::Nitrogen => (
            0.1,
            0.3,
            [
                "Low N - Consider nitrogen fertilization",
                "Moderate N - Monitor levels",
                "High N - May need to reduce nitrogen inputs",
            ],
        ),
        SoilProperty::Phosphorus => (
            10.0,
            30.0,
            [
                "Low P - Consider phosphorus fertilization",
                "Moderate P - Monitor levels",
                "High P - May need to reduce phosphorus inputs",
            ],
        ),
        SoilProperty::Potassium => (
            150.0,
            300.0,
            [
                "Low K - Consider potassium fertilization",
                "Moderate K - Monitor levels",
                "High K - May need to reduce potassium inputs",
            ],
        ),
        _ => return None,
    };

    let text = if value < low {
        texts[0]
    } else if value > high {
        texts[2]
    } else {
        texts[1]
    };
    Some(text)
}

/// Interpretation attached to a property score, if the property has one
pub fn interpret(property: SoilProperty, value: f64) -> Option<String> {
    match property {
        SoilProperty::Ph => Some(ph_interpretation(value).to_string()),
        SoilProperty::OrganicCarbon => Some(organic_carbon_interpretation(value).to_string()),
        _ => nutrient_interpretation(property, value).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ph_band_edges() {
        assert_eq!(ph_interpretation(4.4), "Extremely acidic - May need significant liming");
        assert_eq!(ph_interpretation(4.5), "Very acidic - Consider liming");
        assert_eq!(ph_interpretation(4.99), "Very acidic - Consider liming");
        assert_eq!(ph_interpretation(5.0), "Moderately acidic - May need some liming");
        assert_eq!(ph_interpretation(6.8), "Neutral - Ideal for most plants");
        assert_eq!(ph_interpretation(8.5), PH_TOP);
    }

    #[test]
    fn test_organic_carbon() {
        assert_eq!(organic_carbon_interpretation(0.5), "Very low - Consider adding organic matter");
        assert_eq!(organic_carbon_interpretation(2.0), "Moderate - Good for most crops");
        assert_eq!(organic_carbon_interpretation(6.0), "Very good - Ideal for most crops");
    }

    #[test]
    fn test_nutrients() {
        assert_eq!(
            nutrient_interpretation(SoilProperty::Nitrogen, 0.05),
            Some("Low N - Consider nitrogen fertilization")
        );
        assert_eq!(
            nutrient_interpretation(SoilProperty::Phosphorus, 30.0),
            Some("Moderate P - Monitor levels")
        );
        assert_eq!(
            nutrient_interpretation(SoilProperty::Potassium, 301.0),
            Some("High K - May need to reduce potassium inputs")
        );
        assert_eq!(nutrient_interpretation(SoilProperty::Clay, 25.0), None);
    }

    #[test]
    fn test_interpret_dispatch() {
        assert!(interpret(SoilProperty::Ph, 6.0).is_some());
        assert!(interpret(SoilProperty::Potassium, 200.0).is_some());
        assert!(interpret(SoilProperty::Sand, 40.0).is_none());
    }
}
