//! Remediation advice for root-zone properties outside a crop's guard band

use crate::soil::{RangeFit, SoilProperty};

/// Bullet-point remediation text for a property and direction
///
/// Only the eight crop-catalog properties carry advice; anything else, and
/// in-range values, return `None`.
pub fn detailed_advice(property: SoilProperty, direction: RangeFit) -> Option<&'static str> {
    use RangeFit::{AboveRange as High, BelowRange as Low};

    let text = match (property, direction) {
        (_, RangeFit::WithinRange) => return None,
        (SoilProperty::Ph, Low) => {
            "• Add agricultural lime to increase pH\n\
             • Consider using calcium carbonate\n\
             • Monitor pH changes over time"
        }
        (SoilProperty::Ph, High) => {
            "• Add sulfur or aluminum sulfate to lower pH\n\
             • Use acid-forming fertilizers\n\
             • Consider organic matter amendments"
        }
        (SoilProperty::OrganicCarbon, Low) => {
            "• Add compost or manure\n\
             • Implement crop rotation with legumes\n\
             • Use cover crops\n\
             • Reduce tillage practices"
        }
        (SoilProperty::OrganicCarbon, High) => {
            "• Reduce organic matter inputs\n\
             • Increase tillage frequency\n\
             • Consider crop rotation without legumes"
        }
        (SoilProperty::Nitrogen, Low) => {
            "• Apply nitrogen-rich fertilizers\n\
             • Plant nitrogen-fixing crops\n\
             • Use organic nitrogen sources\n\
             • Consider split applications"
        }
        (SoilProperty::Nitrogen, High) => {
            "• Reduce nitrogen fertilizer application\n\
             • Implement nitrogen-leaching crops\n\
             • Use slow-release fertilizers"
        }
        (SoilProperty::Phosphorus, Low) => {
            "• Apply phosphorus fertilizers\n\
             • Use phosphorus-rich organic matter\n\
             • Consider mycorrhizal inoculation\n\
             • Implement phosphorus-efficient crop rotation"
        }
        (SoilProperty::Phosphorus, High) => {
            "• Reduce phosphorus fertilizer application\n\
             • Use phosphorus-efficient crops\n\
             • Implement erosion control measures"
        }
        (SoilProperty::Potassium, Low) => {
            "• Apply potassium fertilizers\n\
             • Use potassium-rich organic matter\n\
             • Consider potassium-efficient crops\n\
             • Implement balanced fertilization"
        }
        (SoilProperty::Potassium, High) => {
            "• Reduce potassium fertilizer application\n\
             • Use potassium-leaching crops\n\
             • Implement balanced fertilization"
        }
        (SoilProperty::Sand, Low) => {
            "• Add coarse organic matter\n\
             • Implement deep tillage\n\
             • Consider raised beds\n\
             • Use sand-rich amendments"
        }
        (SoilProperty::Sand, High) => {
            "• Add clay or silt\n\
             • Implement conservation tillage\n\
             • Use organic matter amendments\n\
             • Consider contour plowing"
        }
        (SoilProperty::Silt, Low) => {
            "• Add fine-textured materials\n\
             • Implement conservation tillage\n\
             • Use organic matter amendments\n\
             • Consider contour plowing"
        }
        (SoilProperty::Silt, High) => {
            "• Add coarse materials\n\
             • Implement deep tillage\n\
             • Use raised beds\n\
             • Consider erosion control measures"
        }
        (SoilProperty::Clay, Low) => {
            "• Add clay-rich materials\n\
             • Implement conservation tillage\n\
             • Use organic matter amendments\n\
             • Consider contour plowing"
        }
        (SoilProperty::Clay, High) => {
            "• Add coarse materials\n\
             • Implement deep tillage\n\
             • Use raised beds\n\
             • Consider gypsum application"
        }
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ph_advice_lines() {
        let low = detailed_advice(SoilProperty::Ph, RangeFit::BelowRange).unwrap();
        assert_eq!(
            low,
            "• Add agricultural lime to increase pH\n• Consider using calcium carbonate\n• Monitor pH changes over time"
        );
        assert_eq!(low.lines().count(), 3);
    }

    #[test]
    fn test_every_crop_property_has_both_directions() {
        for property in [
            SoilProperty::Ph,
            SoilProperty::OrganicCarbon,
            SoilProperty::Nitrogen,
            SoilProperty::Phosphorus,
            SoilProperty::Potassium,
            SoilProperty::Sand,
            SoilProperty::Silt,
            SoilProperty::Clay,
        ] {
            for direction in [RangeFit::BelowRange, RangeFit::AboveRange] {
                let text = detailed_advice(property, direction).unwrap();
                assert!(text.lines().all(|l| l.starts_with("• ")), "{property}: {text}");
            }
        }
    }

    #[test]
    fn test_no_advice() {
        assert!(detailed_advice(SoilProperty::Zinc, RangeFit::BelowRange).is_none());
        assert!(detailed_advice(SoilProperty::Ph, RangeFit::WithinRange).is_none());
    }
}
