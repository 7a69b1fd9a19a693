//! Check-status codes reported by the backend for parcels and registers.
//!
//! Codes live in fixed, disjoint numeric bands. Classification works on the
//! band rather than on an exhaustive list, so new discrete codes added inside
//! a band keep classifying correctly without touching callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Band of codes for parcels not yet checked.
pub const NOT_CHECKED_RANGE: RangeInclusive<i32> = 1..=100;
/// Band of codes for parcels with validation issues.
pub const HAS_ISSUES_RANGE: RangeInclusive<i32> = 101..=200;
/// Band of codes for parcels that passed validation.
pub const NO_ISSUES_RANGE: RangeInclusive<i32> = 201..=300;
/// Band of codes for approved parcels.
pub const APPROVED_RANGE: RangeInclusive<i32> = 301..=400;
/// Band of codes for parcels marked by the partner.
pub const MARKED_BY_PARTNER_RANGE: RangeInclusive<i32> = 401..=500;

/// Reserved discrete code for "approved with excise".
pub const APPROVED_WITH_EXCISE: i32 = 302;

/// Label used for codes outside every known band.
pub const UNKNOWN_LABEL: &str = "Неизвестный статус";

/// Semantic category of a check-status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatusCategory {
    /// 1..=100
    NotChecked,
    /// 101..=200
    HasIssues,
    /// 201..=300
    NoIssues,
    /// 301..=400 except the excise code
    Approved,
    /// Exactly [`APPROVED_WITH_EXCISE`]
    ApprovedWithExcise,
    /// 401..=500
    MarkedByPartner,
    /// Anything else, including a missing code
    Unknown,
}

impl CheckStatusCategory {
    /// Display label for the category.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotChecked => "Не проверено",
            Self::HasIssues => "Есть вопросы",
            Self::NoIssues => "Нет вопросов",
            Self::Approved => "Согласовано",
            Self::ApprovedWithExcise => "Согласовано с акцизом",
            Self::MarkedByPartner => "Отмечено партнёром",
            Self::Unknown => UNKNOWN_LABEL,
        }
    }
}

/// Immutable wrapper over a raw check-status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckStatusCode(i32);

impl CheckStatusCode {
    /// Wrap a raw code. Never fails; unmapped codes classify as `Unknown`.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Parse a code from a map key such as `"101"`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Category of this code.
    #[must_use]
    pub fn category(self) -> CheckStatusCategory {
        let code = self.0;
        if code == APPROVED_WITH_EXCISE {
            CheckStatusCategory::ApprovedWithExcise
        } else if NOT_CHECKED_RANGE.contains(&code) {
            CheckStatusCategory::NotChecked
        } else if HAS_ISSUES_RANGE.contains(&code) {
            CheckStatusCategory::HasIssues
        } else if NO_ISSUES_RANGE.contains(&code) {
            CheckStatusCategory::NoIssues
        } else if APPROVED_RANGE.contains(&code) {
            CheckStatusCategory::Approved
        } else if MARKED_BY_PARTNER_RANGE.contains(&code) {
            CheckStatusCategory::MarkedByPartner
        } else {
            CheckStatusCategory::Unknown
        }
    }

    /// True iff the code is inside the has-issues band.
    #[must_use]
    pub fn has_issues(self) -> bool {
        HAS_ISSUES_RANGE.contains(&self.0)
    }

    /// True iff the code is the reserved excise-approval code.
    #[must_use]
    pub fn is_approved_with_excise(self) -> bool {
        self.0 == APPROVED_WITH_EXCISE
    }

    /// Qualifier for named discrete codes.
    fn qualifier(self) -> Option<&'static str> {
        match self.0 {
            101 => Some("стоп-слово"),
            102 => Some("неверный формат ТН ВЭД"),
            103 => Some("несуществующий ТН ВЭД"),
            104 => Some("запрещённый ТН ВЭД"),
            301 => Some("вручную"),
            401 => Some("по запросу партнёра"),
            _ => None,
        }
    }

    /// Human-readable label, with a qualifier when `verbose`.
    ///
    /// Unknown codes render the fallback label in both modes.
    #[must_use]
    pub fn to_label(self, verbose: bool) -> String {
        let category = self.category();
        let label = category.label();
        if !verbose || category == CheckStatusCategory::Unknown {
            return label.to_string();
        }
        match self.qualifier() {
            Some(detail) => format!("{label} ({detail})"),
            None if category == CheckStatusCategory::ApprovedWithExcise => label.to_string(),
            None => format!("{label} (код {})", self.0),
        }
    }
}

impl From<i32> for CheckStatusCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for CheckStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_label(false))
    }
}

/// Classify a possibly missing code.
#[must_use]
pub fn classify(code: Option<i32>) -> CheckStatusCategory {
    code.map_or(CheckStatusCategory::Unknown, |c| {
        CheckStatusCode::new(c).category()
    })
}

/// `101 <= code <= 200`; a missing code has no issues.
#[must_use]
pub fn has_issues(code: Option<i32>) -> bool {
    code.is_some_and(|c| CheckStatusCode::new(c).has_issues())
}

/// True only for the reserved excise-approval code.
#[must_use]
pub fn is_approved_with_excise(code: Option<i32>) -> bool {
    code.is_some_and(|c| CheckStatusCode::new(c).is_approved_with_excise())
}

/// Display label for a possibly missing code. Never empty.
#[must_use]
pub fn status_label(code: Option<i32>, verbose: bool) -> String {
    code.map_or_else(
        || UNKNOWN_LABEL.to_string(),
        |c| CheckStatusCode::new(c).to_label(verbose),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_issues_band_edges() {
        assert!(!has_issues(Some(100)));
        assert!(has_issues(Some(101)));
        assert!(has_issues(Some(150)));
        assert!(has_issues(Some(200)));
        assert!(!has_issues(Some(201)));
        assert!(!has_issues(None));
    }

    #[test]
    fn test_has_issues_matches_band_for_all_small_codes() {
        for code in -50..=600 {
            assert_eq!(
                has_issues(Some(code)),
                (101..=200).contains(&code),
                "code {code}"
            );
        }
        assert!(!has_issues(Some(i32::MIN)));
        assert!(!has_issues(Some(i32::MAX)));
    }

    #[test]
    fn test_approved_with_excise_is_single_code() {
        assert!(is_approved_with_excise(Some(APPROVED_WITH_EXCISE)));
        for code in (-10..=600).filter(|c| *c != APPROVED_WITH_EXCISE) {
            assert!(!is_approved_with_excise(Some(code)), "code {code}");
        }
        assert!(!is_approved_with_excise(None));
    }

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify(Some(1)), CheckStatusCategory::NotChecked);
        assert_eq!(classify(Some(101)), CheckStatusCategory::HasIssues);
        assert_eq!(classify(Some(201)), CheckStatusCategory::NoIssues);
        assert_eq!(classify(Some(301)), CheckStatusCategory::Approved);
        assert_eq!(classify(Some(302)), CheckStatusCategory::ApprovedWithExcise);
        assert_eq!(classify(Some(400)), CheckStatusCategory::Approved);
        assert_eq!(classify(Some(450)), CheckStatusCategory::MarkedByPartner);
        assert_eq!(classify(Some(0)), CheckStatusCategory::Unknown);
        assert_eq!(classify(Some(501)), CheckStatusCategory::Unknown);
        assert_eq!(classify(Some(-7)), CheckStatusCategory::Unknown);
        assert_eq!(classify(None), CheckStatusCategory::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(status_label(Some(150), false), "Есть вопросы");
        assert_eq!(status_label(Some(101), true), "Есть вопросы (стоп-слово)");
        assert_eq!(status_label(Some(150), true), "Есть вопросы (код 150)");
        assert_eq!(status_label(Some(302), true), "Согласовано с акцизом");
        assert_eq!(status_label(Some(999), false), UNKNOWN_LABEL);
        assert_eq!(status_label(Some(999), true), UNKNOWN_LABEL);
        assert_eq!(status_label(None, true), UNKNOWN_LABEL);
    }

    #[test]
    fn test_parse_map_keys() {
        assert_eq!(CheckStatusCode::parse("101"), Some(CheckStatusCode::new(101)));
        assert_eq!(CheckStatusCode::parse(" 201 "), Some(CheckStatusCode::new(201)));
        assert_eq!(CheckStatusCode::parse("abc"), None);
        assert_eq!(CheckStatusCode::parse(""), None);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let code = CheckStatusCode::new(104);
        assert_eq!(code.category(), code.category());
        assert_eq!(code.to_label(true), code.to_label(true));
        assert_eq!(code.to_string(), "Есть вопросы");
    }

    #[test]
    fn test_serde_transparent() {
        let code: CheckStatusCode = serde_json::from_str("201").expect("parse code");
        assert_eq!(code.value(), 201);
        assert_eq!(serde_json::to_string(&code).expect("serialize"), "201");
    }
}
