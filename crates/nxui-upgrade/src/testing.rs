use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::sink::{ReportBlock, ReportSink};
use nxui_registry::RegistryLookup;

pub fn installed(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(name, version)| ((*name).to_string(), (*version).to_string()))
        .collect()
}

#[derive(Default)]
pub struct FakeRegistry {
    peers: HashMap<String, IndexMap<String, String>>,
    delays: HashMap<String, u64>,
    failing: HashSet<String>,
    peer_lookups: AtomicUsize,
    completed: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_peers(mut self, name: &str, peers: &[(&str, &str)]) -> Self {
        self.peers.insert(name.to_string(), installed(peers));
        self
    }

    pub fn with_delay(mut self, name: &str, millis: u64) -> Self {
        self.delays.insert(name.to_string(), millis);
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn peer_lookups(&self) -> usize {
        self.peer_lookups.load(Ordering::SeqCst)
    }

    /// Package names in the order their peer lookups finished.
    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl RegistryLookup for FakeRegistry {
    // The engine receives latest versions from its caller.
    async fn latest_version(&self, name: &str) -> anyhow::Result<String> {
        anyhow::bail!("unexpected latest version lookup for {name}")
    }

    async fn peer_dependencies(&self, name: &str) -> anyhow::Result<IndexMap<String, String>> {
        self.peer_lookups.fetch_add(1, Ordering::SeqCst);

        if let Some(millis) = self.delays.get(name) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        self.completed.lock().unwrap().push(name.to_string());

        if self.failing.contains(name) {
            anyhow::bail!("registry unavailable for {name}");
        }
        Ok(self.peers.get(name).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    warnings: Mutex<Vec<String>>,
    blocks: Mutex<Vec<ReportBlock>>,
}

impl RecordingSink {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn blocks(&self) -> Vec<ReportBlock> {
        self.blocks.lock().unwrap().clone()
    }
}

impl ReportSink for RecordingSink {
    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn show_block(&self, block: &ReportBlock) {
        self.blocks.lock().unwrap().push(block.clone());
    }
}
