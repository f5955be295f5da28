use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RoiError;
use crate::history::{History, InvestmentRecord};
use crate::input::{parse_amount, prompt_line};
use crate::reports::chart::{ChartSurface, RoiChart};
use crate::reports::export::{self, ExportOutcome};
use crate::reports::summary::Summary;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MenuChoice {
    Add,
    Summary,
    Chart,
    Export,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<MenuChoice, RoiError> {
        match s {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::Summary),
            "3" => Ok(MenuChoice::Chart),
            "4" => Ok(MenuChoice::Export),
            "5" => Ok(MenuChoice::Exit),
            other => Err(RoiError::InvalidChoice(other.to_string())),
        }
    }
}

const MENU: &str = "\nOptions:
1 - Add a new investment
2 - Show summary table
3 - Plot ROI chart
4 - Save history to CSV
5 - Exit";

/// Menu loop over an owned history. Input, output and the chart surface are
/// injected so the loop can run against in-memory buffers.
pub struct Controller<'a, R, W, C> {
    reader: R,
    writer: W,
    chart: C,
    config: &'a Config,
    history: History,
}

impl<'a, R: BufRead, W: Write, C: ChartSurface> Controller<'a, R, W, C> {
    pub fn new(reader: R, writer: W, chart: C, config: &'a Config) -> Controller<'a, R, W, C> {
        Controller {
            reader,
            writer,
            chart,
            config,
            history: History::new(),
        }
    }

    #[cfg(test)]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs until the user picks exit or input ends.
    pub fn run(&mut self) -> Result<(), RoiError> {
        writeln!(self.writer, "Welcome to the ROI calculator!")?;

        loop {
            writeln!(self.writer, "{}", MENU)?;
            let line = match prompt_line(&mut self.reader, &mut self.writer, "Choose an action (1-5): ") {
                Ok(line) => line,
                Err(RoiError::Cancelled) => {
                    writeln!(self.writer)?;
                    return Ok(());
                }
                Err(err) => return Err(err),
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Add) => self.add()?,
                Ok(MenuChoice::Summary) => self.show_summary()?,
                Ok(MenuChoice::Chart) => self.show_chart()?,
                Ok(MenuChoice::Export) => self.export()?,
                Ok(MenuChoice::Exit) => {
                    writeln!(self.writer, "Thank you for using the ROI calculator!")?;
                    return Ok(());
                }
                Err(err @ RoiError::InvalidChoice(_)) => {
                    debug!(%err, "rejected menu input");
                    writeln!(self.writer, "{}, please try again.", capitalize(&err.to_string()))?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn add(&mut self) -> Result<(), RoiError> {
        loop {
            match self.read_record() {
                Ok(record) => {
                    writeln!(self.writer, "ROI: {:.2}%", record.roi())?;
                    info!(
                        investment = record.investment(),
                        profit = record.profit(),
                        roi = record.roi(),
                        "investment recorded"
                    );
                    self.history.append(record);
                    return Ok(());
                }
                Err(RoiError::Cancelled) => {
                    writeln!(self.writer, "\nInput cancelled, nothing was added.")?;
                    return Ok(());
                }
                Err(RoiError::InvalidNumber(text)) => {
                    debug!(%text, "rejected amount");
                    writeln!(self.writer, "Please enter a valid number (got \"{}\").", text)?;
                }
                Err(RoiError::ZeroInvestment) => {
                    writeln!(self.writer, "Error: investment cannot be zero!")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn read_record(&mut self) -> Result<InvestmentRecord, RoiError> {
        let investment = parse_amount(&prompt_line(
            &mut self.reader,
            &mut self.writer,
            "Enter the investment amount: ",
        )?)?;
        let profit = parse_amount(&prompt_line(
            &mut self.reader,
            &mut self.writer,
            "Enter the profit received: ",
        )?)?;
        InvestmentRecord::new(investment, profit).ok_or(RoiError::ZeroInvestment)
    }

    fn show_summary(&mut self) -> Result<(), RoiError> {
        match Summary::new(&self.history) {
            Some(summary) => writeln!(self.writer, "\nROI summary:\n{}", summary)?,
            None => writeln!(self.writer, "Investment history is empty.")?,
        }
        Ok(())
    }

    fn show_chart(&mut self) -> Result<(), RoiError> {
        match RoiChart::new(&self.history) {
            Some(chart) => {
                if let Err(err) = self.chart.show(&chart) {
                    warn!(%err, "chart display failed");
                    writeln!(self.writer, "Unable to display chart: {}", err)?;
                }
            }
            None => writeln!(self.writer, "No data to plot.")?,
        }
        Ok(())
    }

    fn export(&mut self) -> Result<(), RoiError> {
        let path = self.config.export_path.as_str();
        match export::export(&self.history, path) {
            Ok(ExportOutcome::Nothing) => writeln!(self.writer, "No data to save.")?,
            Ok(ExportOutcome::Written { .. }) => writeln!(self.writer, "History saved to {}", path)?,
            Err(err @ RoiError::Export { .. }) => {
                writeln!(self.writer, "Failed to save history: {}", err)?
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
