//! Per-status parcel count tooltip shown on register rows.

use crate::check_status::{CheckStatusCode, UNKNOWN_LABEL};
use crate::format::format_count;
use crate::types::{ParcelsByCheckStatus, RegisterView};

/// Anything carrying a parcel-count-by-status mapping.
pub trait HasParcelsByCheckStatus {
    /// The mapping, if the backend sent one.
    fn parcels_by_check_status(&self) -> Option<&ParcelsByCheckStatus>;
}

impl HasParcelsByCheckStatus for RegisterView {
    fn parcels_by_check_status(&self) -> Option<&ParcelsByCheckStatus> {
        self.parcels_by_check_status.as_ref()
    }
}

impl HasParcelsByCheckStatus for ParcelsByCheckStatus {
    fn parcels_by_check_status(&self) -> Option<&ParcelsByCheckStatus> {
        Some(self)
    }
}

/// Build the multi-line tooltip: one `"<label>: <count>"` line per entry.
///
/// Returns an empty string when the mapping is absent. Keys that are not
/// integers render with the unknown-status label instead of being dropped.
#[must_use]
pub fn build_tooltip<R>(record: &R) -> String
where
    R: HasParcelsByCheckStatus + ?Sized,
{
    let Some(counts) = record.parcels_by_check_status() else {
        return String::new();
    };

    counts
        .iter()
        .map(|(key, count)| {
            let label = CheckStatusCode::parse(key)
                .map_or_else(|| UNKNOWN_LABEL.to_string(), |code| code.to_label(false));
            format!("{label}: {}", format_count(*count))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_with(entries: &[(&str, i64)]) -> RegisterView {
        RegisterView {
            id: 1,
            parcels_by_check_status: Some(
                entries
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), *v))
                    .collect(),
            ),
            ..RegisterView::default()
        }
    }

    #[test]
    fn test_missing_mapping_is_empty() {
        assert_eq!(build_tooltip(&RegisterView::default()), "");
    }

    #[test]
    fn test_single_entry() {
        let tooltip = build_tooltip(&register_with(&[("101", 5)]));
        assert_eq!(tooltip, "Есть вопросы: 5");
    }

    #[test]
    fn test_grouping_and_order() {
        let tooltip = build_tooltip(&register_with(&[("201", 1500), ("101", 3), ("1", 0)]));
        let lines: Vec<&str> = tooltip.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Нет вопросов: 1\u{a0}500",
                "Есть вопросы: 3",
                "Не проверено: 0"
            ]
        );
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let tooltip = build_tooltip(&register_with(&[("oops", 2), ("9999", 1)]));
        assert_eq!(
            tooltip,
            format!("{UNKNOWN_LABEL}: 2\n{UNKNOWN_LABEL}: 1")
        );
    }

    #[test]
    fn test_large_count() {
        let tooltip = build_tooltip(&register_with(&[("302", 5_000_000_000)]));
        assert_eq!(tooltip, "Согласовано с акцизом: 5\u{a0}000\u{a0}000\u{a0}000");
    }

    #[test]
    fn test_empty_mapping() {
        assert_eq!(build_tooltip(&ParcelsByCheckStatus::new()), "");
    }
}
