use nxui_logger::BlockColor;

/// A labeled section of the upgrade report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    pub label: &'static str,
    pub color: BlockColor,
    pub body: String,
}

/// Where diagnostics and report blocks end up.
pub trait ReportSink {
    fn warn(&self, message: &str);

    fn debug(&self, _message: &str) {}

    fn show_block(&self, block: &ReportBlock);
}

/// Forwards to the global terminal logger.
pub struct TerminalSink {
    color: bool,
}

impl TerminalSink {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }
}

impl ReportSink for TerminalSink {
    fn warn(&self, message: &str) {
        nxui_logger::warn(message);
    }

    fn debug(&self, message: &str) {
        nxui_logger::debug(message);
    }

    fn show_block(&self, block: &ReportBlock) {
        nxui_logger::block(block.label, self.color.then_some(block.color), &block.body);
    }
}
