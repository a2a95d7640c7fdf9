//! Selection state shared by every chart on the dashboard.
//!
//! The two fields are independent: either can be set, cleared or left alone
//! without touching the other. Values are checked against the dataset domain
//! before they land, so a stale or malformed event can never put the
//! dashboard into a state the data cannot answer.

use api::{TurnoutDataset, TurnoutRecord, Year};

/// Current drill-down. `None` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub year: Option<Year>,
    pub constituency: Option<String>,
}

/// What a click on a chart element resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A point on the overall trend line selects its year.
    YearPoint(Year),
    /// A bar selects its constituency and the year it encodes.
    ConstituencyBar { constituency: String, year: Year },
}

/// Everything the dashboard routes through its dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    YearFilter(Option<Year>),
    ConstituencyFilter(Option<String>),
    ChartClick(ClickTarget),
}

impl Selection {
    /// Applies one event, returning whether the selection actually changed.
    ///
    /// Out-of-domain values leave the state untouched. A bar click carries
    /// two values and is rejected whole if either is invalid.
    pub fn apply(&mut self, event: SelectionEvent, dataset: &TurnoutDataset) -> bool {
        match event {
            SelectionEvent::YearFilter(year) => self.set_year(year, dataset),
            SelectionEvent::ConstituencyFilter(constituency) => {
                self.set_constituency(constituency, dataset)
            }
            SelectionEvent::ChartClick(ClickTarget::YearPoint(year)) => {
                self.set_year(Some(year), dataset)
            }
            SelectionEvent::ChartClick(ClickTarget::ConstituencyBar { constituency, year }) => {
                if !dataset.has_constituency(&constituency) || !dataset.has_year(year) {
                    return false;
                }
                let constituency_changed = self.set_constituency(Some(constituency), dataset);
                let year_changed = self.set_year(Some(year), dataset);
                constituency_changed || year_changed
            }
        }
    }

    /// Whether `record` falls inside the selected slice.
    pub fn admits(&self, record: &TurnoutRecord) -> bool {
        self.year.map_or(true, |year| record.year == year)
            && self
                .constituency
                .as_deref()
                .map_or(true, |name| record.constituency == name)
    }

    fn set_year(&mut self, year: Option<Year>, dataset: &TurnoutDataset) -> bool {
        if let Some(year) = year {
            if !dataset.has_year(year) {
                return false;
            }
        }
        if self.year == year {
            return false;
        }
        self.year = year;
        true
    }

    fn set_constituency(&mut self, constituency: Option<String>, dataset: &TurnoutDataset) -> bool {
        if let Some(name) = constituency.as_deref() {
            if !dataset.has_constituency(name) {
                return false;
            }
        }
        if self.constituency == constituency {
            return false;
        }
        self.constituency = constituency;
        true
    }
}

#[cfg(test)]
mod tests {
    use api::{Gender, TurnoutRecord};

    use super::*;

    fn rec(constituency: &str, year: Year, gender: Gender) -> TurnoutRecord {
        TurnoutRecord {
            year,
            constituency: constituency.to_string(),
            gender,
            electors: 1_000,
            votes_polled: 600,
        }
    }

    /// Two constituencies, 2014 and 2019 only.
    fn dataset() -> TurnoutDataset {
        TurnoutDataset::new(vec![
            rec("Lucknow", Year::Y2014, Gender::Male),
            rec("Lucknow", Year::Y2014, Gender::Female),
            rec("Amethi", Year::Y2019, Gender::Male),
            rec("Amethi", Year::Y2019, Gender::Female),
        ])
        .unwrap()
    }

    #[test]
    fn filters_set_and_clear_their_own_field() {
        let ds = dataset();
        let mut sel = Selection::default();

        assert!(sel.apply(SelectionEvent::YearFilter(Some(Year::Y2014)), &ds));
        assert!(sel.apply(
            SelectionEvent::ConstituencyFilter(Some("Amethi".into())),
            &ds
        ));
        assert_eq!(sel.year, Some(Year::Y2014));
        assert_eq!(sel.constituency.as_deref(), Some("Amethi"));

        assert!(sel.apply(SelectionEvent::YearFilter(None), &ds));
        assert_eq!(sel.year, None);
        // Clearing the year left the constituency alone.
        assert_eq!(sel.constituency.as_deref(), Some("Amethi"));
    }

    #[test]
    fn redundant_events_report_no_change() {
        let ds = dataset();
        let mut sel = Selection::default();

        assert!(!sel.apply(SelectionEvent::YearFilter(None), &ds));
        assert!(sel.apply(SelectionEvent::YearFilter(Some(Year::Y2019)), &ds));
        assert!(!sel.apply(SelectionEvent::YearFilter(Some(Year::Y2019)), &ds));
    }

    #[test]
    fn out_of_domain_values_are_ignored() {
        let ds = dataset();
        let mut sel = Selection::default();

        // 2024 exists as a year but not in this dataset.
        assert!(!sel.apply(SelectionEvent::YearFilter(Some(Year::Y2024)), &ds));
        assert!(!sel.apply(
            SelectionEvent::ConstituencyFilter(Some("Jaipur".into())),
            &ds
        ));
        assert_eq!(sel, Selection::default());
    }

    #[test]
    fn year_point_click_selects_the_year() {
        let ds = dataset();
        let mut sel = Selection::default();

        assert!(sel.apply(
            SelectionEvent::ChartClick(ClickTarget::YearPoint(Year::Y2019)),
            &ds
        ));
        assert_eq!(sel.year, Some(Year::Y2019));
        assert_eq!(sel.constituency, None);
    }

    #[test]
    fn bar_click_sets_both_fields() {
        let ds = dataset();
        let mut sel = Selection::default();

        assert!(sel.apply(
            SelectionEvent::ChartClick(ClickTarget::ConstituencyBar {
                constituency: "Amethi".into(),
                year: Year::Y2019,
            }),
            &ds
        ));
        assert_eq!(sel.year, Some(Year::Y2019));
        assert_eq!(sel.constituency.as_deref(), Some("Amethi"));
    }

    #[test]
    fn malformed_bar_click_is_rejected_whole() {
        let ds = dataset();
        let mut sel = Selection::default();

        // Valid year, unknown constituency: neither field moves.
        assert!(!sel.apply(
            SelectionEvent::ChartClick(ClickTarget::ConstituencyBar {
                constituency: "Jaipur".into(),
                year: Year::Y2019,
            }),
            &ds
        ));
        assert_eq!(sel, Selection::default());
    }

    #[test]
    fn independent_fields_commute() {
        let ds = dataset();

        let mut ab = Selection::default();
        ab.apply(SelectionEvent::YearFilter(Some(Year::Y2014)), &ds);
        ab.apply(
            SelectionEvent::ConstituencyFilter(Some("Lucknow".into())),
            &ds,
        );

        let mut ba = Selection::default();
        ba.apply(
            SelectionEvent::ConstituencyFilter(Some("Lucknow".into())),
            &ds,
        );
        ba.apply(SelectionEvent::YearFilter(Some(Year::Y2014)), &ds);

        assert_eq!(ab, ba);
    }

    #[test]
    fn admits_matches_both_fields() {
        let sel = Selection {
            year: Some(Year::Y2014),
            constituency: Some("Lucknow".to_string()),
        };

        assert!(sel.admits(&rec("Lucknow", Year::Y2014, Gender::Male)));
        assert!(!sel.admits(&rec("Lucknow", Year::Y2019, Gender::Male)));
        assert!(!sel.admits(&rec("Amethi", Year::Y2014, Gender::Male)));
    }
}
