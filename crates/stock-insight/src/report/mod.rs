//! Investment reports and comparisons

pub mod data;
pub mod document;
pub mod generator;

pub use data::{Metric, ReportData};
pub use document::{
    COMPARISON_HEADING, Comparison, Report, ReportOutcome, Section, SectionBody, SectionKind,
};
pub use generator::ReportGenerator;
