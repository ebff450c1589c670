// Age Conversion - human-equivalent age and care recommendations

use crate::domain::animal::{Species, SpeciesTraits};

const FALLBACK_EXERCISE: &str = "Recommendation: consult a veterinarian";
const FALLBACK_COAT_CARE: &str = "Coat care: consult a veterinarian for guidance";

/// Piecewise-linear schedule shared by dogs and cats.
///
/// Kept per-species at the dispatch site so the curves can diverge without
/// touching callers.
fn companion_curve(age_years: f64) -> u32 {
    if age_years <= 0.0 {
        return 0;
    }

    let years = age_years.floor() as u32;
    let frac = age_years - f64::from(years);

    match years {
        0 => (15.0 * age_years).round() as u32,
        1 => 15 + (9.0 * (age_years - 1.0)).round() as u32,
        2 => 24 + (4.0 * (age_years - 2.0)).round() as u32,
        _ => 24 + 4 * (years - 2) + (4.0 * frac).round() as u32,
    }
}

/// Human-equivalent age for the given species.
///
/// Returns `None` for species without a conversion curve.
pub fn human_equivalent_age(species: Species, age_years: f64) -> Option<u32> {
    match species {
        Species::Dog | Species::Cat => Some(companion_curve(age_years)),
        Species::Other => None,
    }
}

/// Daily exercise guidance from a dog's size class.
///
/// Case-insensitive substring match; anything unrecognized falls back to the
/// generic consult message. Never errors.
pub fn exercise_recommendation(size: Option<&str>) -> String {
    let Some(size) = size else {
        return FALLBACK_EXERCISE.to_string();
    };

    let size = size.to_lowercase();
    if size.contains("small") {
        "Recommendation: 30 minutes of walking per day".to_string()
    } else if size.contains("medium") {
        "Recommendation: 1 hour of exercise per day".to_string()
    } else if size.contains("large") {
        "Recommendation: 1.5 to 2 hours of exercise per day".to_string()
    } else {
        FALLBACK_EXERCISE.to_string()
    }
}

/// Grooming guidance from a cat's coat length.
pub fn coat_care_recommendation(coat: Option<&str>) -> String {
    let Some(coat) = coat else {
        return FALLBACK_COAT_CARE.to_string();
    };

    let coat = coat.to_lowercase();
    if coat.contains("short") {
        "Coat care: weekly brushing is enough".to_string()
    } else if coat.contains("medium") {
        "Coat care: brushing 2-3 times per week".to_string()
    } else if coat.contains("long") {
        "Coat care: daily brushing to prevent matting".to_string()
    } else {
        FALLBACK_COAT_CARE.to_string()
    }
}

/// Handling note from a cat's recorded temperament.
pub fn temperament_note(temperament: Option<&str>) -> String {
    let Some(temperament) = temperament else {
        return "Temperament not recorded".to_string();
    };

    let lower = temperament.to_lowercase();
    if lower.contains("aggressive") {
        "Caution: aggressive temperament, handle with care".to_string()
    } else if lower.contains("shy") || lower.contains("timid") {
        "Shy cat: needs a calm environment and patience".to_string()
    } else if lower.contains("active") {
        "Active cat: needs regular stimulation and play".to_string()
    } else if lower.contains("calm") {
        "Calm cat: even and settled temperament".to_string()
    } else {
        format!("Temperament on record: {}", temperament)
    }
}

/// All care lines for a traits payload, dispatched on the tag
pub fn care_recommendations(traits: &SpeciesTraits) -> Vec<String> {
    match traits {
        SpeciesTraits::Dog { size } => vec![exercise_recommendation(size.as_deref())],
        SpeciesTraits::Cat { coat, temperament } => vec![
            coat_care_recommendation(coat.as_deref()),
            temperament_note(temperament.as_deref()),
        ],
        SpeciesTraits::Other => vec![FALLBACK_EXERCISE.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn puppy_half_year_rounds_to_eight() {
        assert_eq!(human_equivalent_age(Species::Dog, 0.5), Some(8));
        assert_eq!(human_equivalent_age(Species::Cat, 0.5), Some(8));
    }

    #[test]
    fn three_and_a_half_years_is_thirty() {
        // 24 + 4*(3-2) + round(4*0.5) = 30
        assert_eq!(human_equivalent_age(Species::Dog, 3.5), Some(30));
    }

    #[test]
    fn curve_segment_boundaries() {
        assert_eq!(human_equivalent_age(Species::Dog, 1.0), Some(15));
        assert_eq!(human_equivalent_age(Species::Dog, 2.0), Some(24));
        assert_eq!(human_equivalent_age(Species::Dog, 3.0), Some(28));
        assert_eq!(human_equivalent_age(Species::Cat, 10.0), Some(56));
    }

    #[test]
    fn non_positive_age_maps_to_zero() {
        assert_eq!(human_equivalent_age(Species::Dog, 0.0), Some(0));
        assert_eq!(human_equivalent_age(Species::Cat, -2.0), Some(0));
    }

    #[test]
    fn unsupported_species_has_no_conversion() {
        assert_eq!(human_equivalent_age(Species::Other, 5.0), None);
    }

    #[test]
    fn size_matching_is_case_insensitive_substring() {
        assert!(exercise_recommendation(Some("Small")).contains("30 minutes"));
        assert!(exercise_recommendation(Some("medium-sized")).contains("1 hour"));
        assert!(exercise_recommendation(Some("LARGE")).contains("2 hours"));
        assert_eq!(exercise_recommendation(Some("giant")), FALLBACK_EXERCISE);
        assert_eq!(exercise_recommendation(None), FALLBACK_EXERCISE);
    }

    #[test]
    fn coat_matching_falls_back_on_unknown() {
        assert!(coat_care_recommendation(Some("short")).contains("weekly"));
        assert!(coat_care_recommendation(Some("Long-haired")).contains("daily"));
        assert_eq!(coat_care_recommendation(Some("curly")), FALLBACK_COAT_CARE);
        assert_eq!(coat_care_recommendation(None), FALLBACK_COAT_CARE);
    }

    #[test]
    fn temperament_notes_cover_known_keywords() {
        assert!(temperament_note(Some("very aggressive")).contains("Caution"));
        assert!(temperament_note(Some("Shy")).contains("calm environment"));
        assert!(temperament_note(Some("active")).contains("play"));
        assert!(temperament_note(Some("calm")).contains("settled"));
        assert!(temperament_note(Some("aloof")).contains("aloof"));
        assert_eq!(temperament_note(None), "Temperament not recorded");
    }
}
