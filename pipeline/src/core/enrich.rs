//! Attribute enrichment stage

use chrono::Datelike;

use shared::{PipelineState, ZodiacSign};

/// Inclusive (month, day) ranges of the signs within one calendar year.
/// Capricorn wraps the year boundary, so every date outside these ranges
/// belongs to it.
const ZODIAC_RANGES: [(ZodiacSign, (u32, u32), (u32, u32)); 11] = [
    (ZodiacSign::Aquarius, (1, 20), (2, 18)),
    (ZodiacSign::Pisces, (2, 19), (3, 20)),
    (ZodiacSign::Aries, (3, 21), (4, 19)),
    (ZodiacSign::Taurus, (4, 20), (5, 20)),
    (ZodiacSign::Gemini, (5, 21), (6, 20)),
    (ZodiacSign::Cancer, (6, 21), (7, 22)),
    (ZodiacSign::Leo, (7, 23), (8, 22)),
    (ZodiacSign::Virgo, (8, 23), (9, 22)),
    (ZodiacSign::Libra, (9, 23), (10, 22)),
    (ZodiacSign::Scorpio, (10, 23), (11, 21)),
    (ZodiacSign::Sagittarius, (11, 22), (12, 21)),
];

/// Sign for a calendar day, compared as a (month, day) tuple.
pub fn zodiac_sign(month: u32, day: u32) -> ZodiacSign {
    let date = (month, day);
    for (sign, start, end) in ZODIAC_RANGES {
        if start <= date && date <= end {
            return sign;
        }
    }
    ZodiacSign::Capricorn
}

/// Digit sum of the raw date string reduced into 1..=9; exact multiples of
/// nine land on nine. Separators contribute no digits, so the format of the
/// string does not matter.
pub fn astrological_number(dob: &str) -> u32 {
    let total: u32 = dob.chars().filter_map(|c| c.to_digit(10)).sum();
    match total % 9 {
        0 => 9,
        n => n,
    }
}

/// Derive the zodiac sign and astrological number from validated inputs.
///
/// Pure and idempotent. Runs only after validation stored the parsed date;
/// without it the state passes through unchanged.
pub fn enrich_state(mut state: PipelineState) -> PipelineState {
    if let Some(date) = state.parsed_date {
        state.zodiac = Some(zodiac_sign(date.month(), date.day()));
        state.astro_number = Some(astrological_number(&state.dob));
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate::validate_input;
    use shared::HoroscopeVariant;

    #[test]
    fn test_zodiac_boundaries() {
        assert_eq!(zodiac_sign(12, 22), ZodiacSign::Capricorn);
        assert_eq!(zodiac_sign(1, 19), ZodiacSign::Capricorn);
        assert_eq!(zodiac_sign(1, 20), ZodiacSign::Aquarius);
        assert_eq!(zodiac_sign(3, 20), ZodiacSign::Pisces);
        assert_eq!(zodiac_sign(3, 21), ZodiacSign::Aries);
    }

    #[test]
    fn test_zodiac_year_wrap() {
        assert_eq!(zodiac_sign(12, 31), ZodiacSign::Capricorn);
        assert_eq!(zodiac_sign(1, 1), ZodiacSign::Capricorn);
    }

    #[test]
    fn test_zodiac_mid_ranges() {
        assert_eq!(zodiac_sign(7, 1), ZodiacSign::Cancer);
        assert_eq!(zodiac_sign(8, 15), ZodiacSign::Leo);
        assert_eq!(zodiac_sign(11, 21), ZodiacSign::Scorpio);
        assert_eq!(zodiac_sign(11, 22), ZodiacSign::Sagittarius);
    }

    #[test]
    fn test_astrological_number_digit_sum() {
        // 3+1+1+2+1+9+9+9 = 35, 35 % 9 = 8
        assert_eq!(astrological_number("31.12.1999"), 8);
    }

    #[test]
    fn test_astrological_number_multiple_of_nine_maps_to_nine() {
        // 2+7+9+1+9+8+0 = 36
        assert_eq!(astrological_number("27.09.1980"), 9);
    }

    #[test]
    fn test_astrological_number_stays_in_range() {
        for dob in ["01.01.2000", "15.06.1985", "31.12.1999", "09.09.1999"] {
            let n = astrological_number(dob);
            assert!((1..=9).contains(&n), "{dob} produced {n}");
        }
    }

    #[test]
    fn test_enrich_fills_both_attributes() {
        let state = validate_input(PipelineState::new(
            "Jana",
            "31.12.1999",
            HoroscopeVariant::Basic,
        ));
        let state = enrich_state(state);

        assert_eq!(state.zodiac, Some(ZodiacSign::Capricorn));
        assert_eq!(state.astro_number, Some(8));
    }

    #[test]
    fn test_enrich_is_idempotent() {
        let state = validate_input(PipelineState::new(
            "Jana",
            "15.03.1990",
            HoroscopeVariant::Basic,
        ));
        let once = enrich_state(state);
        let twice = enrich_state(once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_enrich_without_parsed_date_is_a_no_op() {
        let state = PipelineState::new("Jana", "garbage", HoroscopeVariant::Basic);
        let state = enrich_state(state);

        assert!(state.zodiac.is_none());
        assert!(state.astro_number.is_none());
    }
}
