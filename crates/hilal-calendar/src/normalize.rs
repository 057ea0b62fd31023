//! Mapping of locale-provided month names onto [`IslamicMonth`].

use hilal_types::IslamicMonth;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const GREGORIAN_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Ordered matching rules. The second-half Rabi' and Jumada patterns must
/// stay ahead of their generic stems.
static RULES: LazyLock<Vec<(Regex, IslamicMonth)>> = LazyLock::new(|| {
    [
        ("muharram", IslamicMonth::Muharram),
        ("safar", IslamicMonth::Safar),
        ("rabi.*(ii|2|thani|akhir)", IslamicMonth::RabiAlThani),
        ("rabi", IslamicMonth::RabiAlAwwal),
        ("jumad.*(ii|2|thani|akhir)", IslamicMonth::JumadaAlThani),
        ("jumad", IslamicMonth::JumadaAlUla),
        ("rajab", IslamicMonth::Rajab),
        ("sha'?b", IslamicMonth::Shaban),
        ("ramad", IslamicMonth::Ramadan),
        ("shaww", IslamicMonth::Shawwal),
        ("dhu.*hijj", IslamicMonth::DhulHijjah),
        ("dhu.*q", IslamicMonth::DhulQidah),
    ]
    .into_iter()
    .map(|(pattern, month)| (Regex::new(pattern).expect("month pattern is valid"), month))
    .collect()
});

/// Maps a month name as spelled by some locale calendar to the canonical month.
///
/// Returns `None` for Gregorian month names (a locale layer that silently fell
/// back to the Gregorian calendar) and for anything unrecognised.
pub fn normalize_month_name(name: &str) -> Option<IslamicMonth> {
    let folded = fold(name);
    if folded.is_empty() || GREGORIAN_MONTHS.contains(&folded.as_str()) {
        return None;
    }
    RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&folded))
        .map(|(_, month)| *month)
}

/// Lowercases, strips diacritics (NFD marks) and ayn/hamza marks, and turns
/// hyphens into spaces.
fn fold(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            'ʻ' | 'ʼ' | 'ʿ' | 'ʾ' | '‘' | '’' => None,
            '-' => Some(' '),
            other => Some(other),
        })
        .collect();
    folded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cldr_english_names() {
        let cases = [
            ("Muharram", IslamicMonth::Muharram),
            ("Safar", IslamicMonth::Safar),
            ("Rabiʻ I", IslamicMonth::RabiAlAwwal),
            ("Rabiʻ II", IslamicMonth::RabiAlThani),
            ("Jumada I", IslamicMonth::JumadaAlUla),
            ("Jumada II", IslamicMonth::JumadaAlThani),
            ("Rajab", IslamicMonth::Rajab),
            ("Shaʻban", IslamicMonth::Shaban),
            ("Ramadan", IslamicMonth::Ramadan),
            ("Shawwal", IslamicMonth::Shawwal),
            ("Dhuʻl-Qiʻdah", IslamicMonth::DhulQidah),
            ("Dhuʻl-Hijjah", IslamicMonth::DhulHijjah),
        ];
        for (name, expected) in cases {
            assert_eq!(normalize_month_name(name), Some(expected), "{name}");
        }
    }

    #[test]
    fn second_half_stems_win_over_generic() {
        assert_eq!(
            normalize_month_name("Rabi' al-Akhir"),
            Some(IslamicMonth::RabiAlThani)
        );
        assert_eq!(
            normalize_month_name("Rabi' al-Thani"),
            Some(IslamicMonth::RabiAlThani)
        );
        assert_eq!(normalize_month_name("Rabi 2"), Some(IslamicMonth::RabiAlThani));
        assert_eq!(
            normalize_month_name("Rabi' al-Awwal"),
            Some(IslamicMonth::RabiAlAwwal)
        );
        assert_eq!(
            normalize_month_name("Jumada al-Akhirah"),
            Some(IslamicMonth::JumadaAlThani)
        );
        assert_eq!(
            normalize_month_name("Jumādā al-Ūlā"),
            Some(IslamicMonth::JumadaAlUla)
        );
    }

    #[test]
    fn canonical_names_map_to_themselves() {
        for month in IslamicMonth::ALL {
            assert_eq!(normalize_month_name(month.name()), Some(month));
        }
    }

    #[test]
    fn diacritics_are_folded() {
        assert_eq!(normalize_month_name("Muḥarram"), Some(IslamicMonth::Muharram));
        assert_eq!(normalize_month_name("Ramaḍān"), Some(IslamicMonth::Ramadan));
        assert_eq!(
            normalize_month_name("Dhū al-Ḥijjah"),
            Some(IslamicMonth::DhulHijjah)
        );
        assert_eq!(
            normalize_month_name("Sha\u{0304}ʿba\u{0304}n"),
            Some(IslamicMonth::Shaban)
        );
    }

    #[test]
    fn any_precomposed_letter_is_folded() {
        assert_eq!(normalize_month_name("Ramaḑan"), Some(IslamicMonth::Ramadan));
        assert_eq!(normalize_month_name("Rajǎb"), Some(IslamicMonth::Rajab));
        assert_eq!(normalize_month_name("Jumȃda II"), Some(IslamicMonth::JumadaAlThani));
        assert_eq!(normalize_month_name("ŞAFAR"), Some(IslamicMonth::Safar));
        assert_eq!(normalize_month_name("Dhū'l-Qa'dah"), Some(IslamicMonth::DhulQidah));
    }

    #[test]
    fn gregorian_names_are_rejected() {
        assert_eq!(normalize_month_name("March"), None);
        assert_eq!(normalize_month_name(" DECEMBER "), None);
    }

    #[test]
    fn unknown_and_empty_are_rejected() {
        assert_eq!(normalize_month_name(""), None);
        assert_eq!(normalize_month_name("Thermidor"), None);
    }
}
