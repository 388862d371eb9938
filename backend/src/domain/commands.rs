//! Domain-level query types.
//!
//! These are what the statistics service consumes. The REST layer receives raw
//! strings and turns them into these types with the parsers below, so every
//! malformed parameter surfaces as a [`ValidationError`].

pub mod scope {
    use crate::domain::errors::ValidationError;

    /// `context` selector for income and balance reports
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ReportContext {
        Moi,
        Couple,
    }

    impl ReportContext {
        pub fn parse(raw: &str) -> Result<Self, ValidationError> {
            match raw.trim() {
                "moi" => Ok(ReportContext::Moi),
                "couple" => Ok(ReportContext::Couple),
                other => Err(ValidationError::InvalidContext(other.to_string())),
            }
        }
    }

    /// `view` selector for expense reports
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ExpenseView {
        Moi,
        Partenaire,
        CoupleComplet,
    }

    impl ExpenseView {
        pub fn parse(raw: &str) -> Result<Self, ValidationError> {
            match raw.trim() {
                "moi" => Ok(ExpenseView::Moi),
                "partenaire" => Ok(ExpenseView::Partenaire),
                "couple_complet" => Ok(ExpenseView::CoupleComplet),
                other => Err(ValidationError::InvalidView(other.to_string())),
            }
        }
    }

    /// Whose records a report covers
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Scope {
        SelfOnly,
        PartnerOnly,
        Couple,
    }

    impl Scope {
        pub fn label(&self) -> &'static str {
            match self {
                Scope::SelfOnly => "moi",
                Scope::PartnerOnly => "partenaire",
                Scope::Couple => "couple",
            }
        }

        pub fn needs_partner(&self) -> bool {
            !matches!(self, Scope::SelfOnly)
        }
    }

    impl From<ReportContext> for Scope {
        fn from(context: ReportContext) -> Self {
            match context {
                ReportContext::Moi => Scope::SelfOnly,
                ReportContext::Couple => Scope::Couple,
            }
        }
    }

    impl From<ExpenseView> for Scope {
        fn from(view: ExpenseView) -> Self {
            match view {
                ExpenseView::Moi => Scope::SelfOnly,
                ExpenseView::Partenaire => Scope::PartnerOnly,
                ExpenseView::CoupleComplet => Scope::Couple,
            }
        }
    }
}

pub mod params {
    use chrono::NaiveDate;

    use crate::domain::errors::ValidationError;
    use crate::domain::models::RecordKind;
    use crate::domain::time_window::YearMonth;

    /// Resolve `annee`/`mois`, defaulting each missing part to today's month
    pub fn parse_year_month(
        annee: Option<&str>,
        mois: Option<&str>,
        today: NaiveDate,
    ) -> Result<YearMonth, ValidationError> {
        let current = YearMonth::of(today);

        let year = match annee.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| ValidationError::InvalidYear(raw.to_string()))?,
            None => current.year,
        };
        let month = match mois.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| ValidationError::InvalidMonth(raw.to_string()))?,
            None => current.month,
        };

        YearMonth::new(year, month)
    }

    /// Parse a "last N months" count; zero is allowed and yields no months
    pub fn parse_month_count(
        raw: Option<&str>,
        default: u32,
        max: u32,
    ) -> Result<i64, ValidationError> {
        let count = match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => value
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidMonthCount(value.to_string()))?,
            None => i64::from(default),
        };

        if count < 0 {
            return Err(ValidationError::InvalidMonthCount(count.to_string()));
        }
        if count > i64::from(max) {
            return Err(ValidationError::MonthCountTooLarge { requested: count, max });
        }
        Ok(count)
    }

    /// Parse a rise threshold in percent, falling back to `default`
    pub fn parse_threshold(raw: Option<&str>, default: f64) -> Result<f64, ValidationError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => match value.parse::<f64>() {
                Ok(threshold) if threshold.is_finite() && threshold >= 0.0 => Ok(threshold),
                _ => Err(ValidationError::InvalidThreshold(value.to_string())),
            },
            None => Ok(default),
        }
    }

    pub fn parse_record_kind(raw: Option<&str>) -> Result<RecordKind, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") | Some("depenses") => Ok(RecordKind::Expense),
            Some("revenus") => Ok(RecordKind::Income),
            Some(other) => Err(ValidationError::InvalidRecordKind(other.to_string())),
        }
    }
}

pub mod reports {
    use chrono::NaiveDate;

    use super::scope::{ExpenseView, ReportContext};
    use crate::domain::models::RecordKind;
    use crate::domain::time_window::YearMonth;

    #[derive(Debug, Clone)]
    pub struct MonthlyBalanceQuery {
        pub caller_id: String,
        pub month: YearMonth,
        pub context: ReportContext,
    }

    /// Incomes are scoped by `context`, expenses by `view`
    #[derive(Debug, Clone)]
    pub struct CategoryDistributionQuery {
        pub caller_id: String,
        pub month: YearMonth,
        pub kind: RecordKind,
        pub context: ReportContext,
        pub view: ExpenseView,
    }

    #[derive(Debug, Clone)]
    pub struct ComparisonQuery {
        pub caller_id: String,
        pub month: YearMonth,
        pub view: ExpenseView,
        pub threshold_percent: f64,
    }

    #[derive(Debug, Clone)]
    pub struct CoupleMonthQuery {
        pub caller_id: String,
        pub month: YearMonth,
    }

    #[derive(Debug, Clone)]
    pub struct MonthlySynthesisQuery {
        pub caller_id: String,
        pub month: YearMonth,
        pub threshold_percent: f64,
    }

    /// Totals for the `month_count` months ending with the month of `anchor`
    #[derive(Debug, Clone)]
    pub struct MonthlyEvolutionQuery {
        pub caller_id: String,
        pub month_count: i64,
        pub anchor: NaiveDate,
        pub context: ReportContext,
    }
}

#[cfg(test)]
mod tests {
    use super::params::*;
    use super::scope::*;
    use crate::domain::errors::ValidationError;
    use crate::domain::models::RecordKind;
    use crate::domain::time_window::YearMonth;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_year_month_defaults_to_today() {
        assert_eq!(
            parse_year_month(None, None, today()).unwrap(),
            YearMonth { year: 2024, month: 5 }
        );
        assert_eq!(
            parse_year_month(Some("2023"), Some(" 2 "), today()).unwrap(),
            YearMonth { year: 2023, month: 2 }
        );
    }

    #[test]
    fn test_year_month_rejects_malformed_values() {
        assert_eq!(
            parse_year_month(Some("deux-mille"), None, today()),
            Err(ValidationError::InvalidYear("deux-mille".to_string()))
        );
        assert_eq!(
            parse_year_month(None, Some("13"), today()),
            Err(ValidationError::InvalidMonth("13".to_string()))
        );
        assert_eq!(
            parse_year_month(None, Some("-1"), today()),
            Err(ValidationError::InvalidMonth("-1".to_string()))
        );
    }

    #[test]
    fn test_month_count_bounds() {
        assert_eq!(parse_month_count(None, 6, 24), Ok(6));
        assert_eq!(parse_month_count(Some("0"), 6, 24), Ok(0));
        assert_eq!(
            parse_month_count(Some("-3"), 6, 24),
            Err(ValidationError::InvalidMonthCount("-3".to_string()))
        );
        assert_eq!(
            parse_month_count(Some("25"), 6, 24),
            Err(ValidationError::MonthCountTooLarge { requested: 25, max: 24 })
        );
        assert!(parse_month_count(Some("six"), 6, 24).is_err());
    }

    #[test]
    fn test_threshold_parsing() {
        assert_eq!(parse_threshold(None, 20.0), Ok(20.0));
        assert_eq!(parse_threshold(Some("12.5"), 20.0), Ok(12.5));
        assert!(parse_threshold(Some("-1"), 20.0).is_err());
        assert!(parse_threshold(Some("NaN"), 20.0).is_err());
    }

    #[test]
    fn test_selectors() {
        assert_eq!(Scope::from(ReportContext::parse("couple").unwrap()), Scope::Couple);
        assert_eq!(Scope::from(ExpenseView::parse("partenaire").unwrap()), Scope::PartnerOnly);
        assert_eq!(Scope::from(ExpenseView::parse("couple_complet").unwrap()), Scope::Couple);
        assert!(ReportContext::parse("partenaire").is_err());
        assert!(ExpenseView::parse("nous").is_err());
        assert_eq!(parse_record_kind(Some("revenus")), Ok(RecordKind::Income));
        assert_eq!(parse_record_kind(None), Ok(RecordKind::Expense));
        assert!(parse_record_kind(Some("transferts")).is_err());
    }
}
