use crate::candidate::UpgradeCandidate;
use crate::sink::ReportBlock;
use nxui_constants::{COMPONENTS_LABEL, LATEST_MARKER, PEER_DEPENDENCIES_LABEL};
use nxui_logger::BlockColor;

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";
const ARROW: &str = "  ->  ";

/// Widest value of each displayed field across a candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub package: usize,
    /// `<mode><version>`
    pub version: usize,
    /// `<mode><latest>`
    pub latest: usize,
}

impl ColumnWidths {
    pub fn compute(list: &[UpgradeCandidate]) -> Self {
        list.iter().fold(Self::default(), |widths, candidate| {
            let mode = candidate.version_mode.as_str().len();
            Self {
                package: widths.package.max(candidate.package.len()),
                version: widths.version.max(mode + candidate.version.len()),
                latest: widths.latest.max(mode + candidate.display.width()),
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Components,
    PeerDependencies,
}

impl Section {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Components => COMPONENTS_LABEL,
            Self::PeerDependencies => PEER_DEPENDENCIES_LABEL,
        }
    }

    pub const fn color(self) -> BlockColor {
        match self {
            Self::Components => BlockColor::Blue,
            Self::PeerDependencies => BlockColor::Yellow,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub primary_text: String,
    pub peer_text: String,
}

impl Report {
    pub fn blocks(&self) -> [ReportBlock; 2] {
        [
            ReportBlock {
                label: Section::Components.label(),
                color: Section::Components.color(),
                body: self.primary_text.clone(),
            },
            ReportBlock {
                label: Section::PeerDependencies.label(),
                color: Section::PeerDependencies.color(),
                body: self.peer_text.clone(),
            },
        ]
    }
}

pub struct ReportFormatter {
    color: bool,
}

impl ReportFormatter {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, primary: &[UpgradeCandidate], peers: &[UpgradeCandidate]) -> Report {
        Report {
            primary_text: self.render_section(primary, Section::Components),
            peer_text: self.render_section(peers, Section::PeerDependencies),
        }
    }

    /// One line per candidate, already-latest peers left out.
    pub fn render_section(&self, list: &[UpgradeCandidate], section: Section) -> String {
        let widths = ColumnWidths::compute(list);

        list.iter()
            .filter(|c| !(c.is_latest && section == Section::PeerDependencies))
            .map(|c| self.render_row(c, widths))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_row(&self, candidate: &UpgradeCandidate, widths: ColumnWidths) -> String {
        let mode = candidate.version_mode.as_str();
        let current = format!("{mode}{}", candidate.version);

        if candidate.is_latest {
            let span = widths.package + COLUMN_GAP.len() + widths.version;
            let marker_width = ARROW.len() + widths.latest;
            return format!(
                "{INDENT}{:<span$}{LATEST_MARKER:>marker_width$}",
                format!("{}@{current}", candidate.package),
            );
        }

        format!(
            "{INDENT}{:<package_width$}{COLUMN_GAP}{current:<version_width$}{ARROW}{mode}{}",
            candidate.package,
            candidate.display.paint(self.color),
            package_width = widths.package,
            version_width = widths.version,
        )
    }
}
