pub mod candidate;
pub mod engine;
pub mod peers;
pub mod report;
pub mod sink;

#[cfg(test)]
mod testing;

pub use candidate::UpgradeCandidate;
pub use engine::{EngineConfig, UpgradeEngine, UpgradeRequest};
pub use peers::PeerResolver;
pub use report::{ColumnWidths, Report, ReportFormatter, Section};
pub use sink::{ReportBlock, ReportSink, TerminalSink};
