use std::fmt;

use crate::history::History;
use crate::roi;

pub struct SummaryRow {
    pub id: usize,
    pub investment: f64,
    pub profit: f64,
    pub roi: f64,
}

pub struct SummaryTotals {
    pub investment: f64,
    pub profit: f64,
    /// `None` when the investments sum to zero; displayed as 0.00.
    pub roi: Option<f64>,
}

pub struct Summary {
    rows: Vec<SummaryRow>,
    totals: SummaryTotals,
}

impl Summary {
    /// Builds the table, or `None` if there is nothing to report.
    pub fn new(history: &History) -> Option<Summary> {
        if history.is_empty() {
            return None;
        }

        let rows: Vec<SummaryRow> = history
            .all()
            .iter()
            .enumerate()
            .map(|(i, record)| SummaryRow {
                id: i + 1,
                investment: record.investment(),
                profit: record.profit(),
                roi: record.roi(),
            })
            .collect();

        let investment: f64 = rows.iter().map(|row| row.investment).sum();
        let profit: f64 = rows.iter().map(|row| row.profit).sum();

        Some(Summary {
            rows,
            totals: SummaryTotals {
                investment,
                profit,
                roi: roi::calculate(investment, profit),
            },
        })
    }

    pub fn rows(&self) -> &[SummaryRow] { &self.rows }
    pub fn totals(&self) -> &SummaryTotals { &self.totals }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<14} {:<14} {:<10} {}", "Investment", "Profit", "ROI (%)", "ID")?;
        for row in self.rows().iter() {
            writeln!(
                f,
                "{:<14.2} {:<14.2} {:<10.2} {}",
                row.investment, row.profit, row.roi, row.id
            )?;
        }
        writeln!(f, "{}", "-".repeat(46))?;
        let totals = self.totals();
        write!(
            f,
            "{:<14.2} {:<14.2} {:<10.2} {}",
            totals.investment,
            totals.profit,
            totals.roi.unwrap_or(0f64),
            "Total"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::InvestmentRecord;

    fn history_of(entries: &[(f64, f64)]) -> History {
        let mut history = History::new();
        for &(investment, profit) in entries {
            history.append(InvestmentRecord::new(investment, profit).unwrap());
        }
        history
    }

    #[test]
    fn empty_history_has_no_summary() {
        assert!(Summary::new(&History::new()).is_none());
    }

    #[test]
    fn totals_for_gain_and_loss() {
        let summary = Summary::new(&history_of(&[(100.0, 150.0), (200.0, 180.0)])).unwrap();
        let totals = summary.totals();
        assert_eq!(totals.investment, 300.0);
        assert_eq!(totals.profit, 330.0);
        assert!((totals.roi.unwrap() - 10.0).abs() < 1e-9);

        let text = summary.to_string();
        assert!(text.contains("50.00"));
        assert!(text.contains("-10.00"));
        assert_eq!(
            text.lines().last().unwrap(),
            "300.00         330.00         10.00      Total"
        );
    }

    #[test]
    fn lines_have_no_trailing_padding() {
        let summary = Summary::new(&history_of(&[(100.0, 150.0)])).unwrap();
        let text = summary.to_string();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "Investment     Profit         ROI (%)    ID",
                "100.00         150.00         50.00      1",
                "----------------------------------------------",
                "150.00         150.00         50.00      Total",
            ]
        );
    }

    #[test]
    fn one_row_per_record_in_order_plus_aggregate() {
        let entries = [(10.0, 20.0), (30.0, 15.0), (5.0, 5.0), (80.0, 100.0)];
        let summary = Summary::new(&history_of(&entries)).unwrap();

        let ids: Vec<usize> = summary.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let investments: Vec<f64> = summary.rows().iter().map(|r| r.investment).collect();
        assert_eq!(investments, vec![10.0, 30.0, 5.0, 80.0]);

        // header + rows + separator + aggregate
        let text = summary.to_string();
        assert_eq!(text.lines().count(), 1 + entries.len() + 1 + 1);
        assert!(text.lines().nth(2).unwrap().ends_with(" 2"));
    }

    #[test]
    fn aggregate_roi_matches_calculator_on_sums() {
        let summary = Summary::new(&history_of(&[(10.0, 20.0), (30.0, 15.0)])).unwrap();
        assert_eq!(summary.totals().roi, roi::calculate(40.0, 35.0));
    }

    #[test]
    fn zero_total_investment_displays_zero_roi() {
        let summary = Summary::new(&history_of(&[(100.0, 50.0), (-100.0, 20.0)])).unwrap();
        assert_eq!(summary.totals().investment, 0.0);
        assert!(summary.totals().roi.is_none());

        let text = summary.to_string();
        let last = text.lines().last().unwrap();
        let columns: Vec<&str> = last.split_whitespace().collect();
        assert_eq!(columns, vec!["0.00", "70.00", "0.00", "Total"]);
    }
}
