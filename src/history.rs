use serde::Serialize;

use crate::roi;

/// One investment captured during the session. The ROI is derived once at
/// construction and the record is never changed afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct InvestmentRecord {
    investment: f64,
    profit: f64,
    roi: f64,
}

impl InvestmentRecord {
    pub fn new(investment: f64, profit: f64) -> Option<InvestmentRecord> {
        let roi = roi::calculate(investment, profit)?;
        Some(InvestmentRecord {
            investment,
            profit,
            roi,
        })
    }

    pub fn investment(&self) -> f64 { self.investment }
    pub fn profit(&self) -> f64 { self.profit }
    pub fn roi(&self) -> f64 { self.roi }
}

/// Append-only, insertion-ordered list of records for the current session.
#[derive(Debug, Default)]
pub struct History {
    records: Vec<InvestmentRecord>,
}

impl History {
    pub fn new() -> History {
        History {
            records: Vec::new(),
        }
    }

    pub fn append(&mut self, record: InvestmentRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn all(&self) -> &[InvestmentRecord] {
        &self.records
    }
}
