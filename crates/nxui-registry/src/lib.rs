use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

use nxui_constants::{MAX_ATTEMPTS, REGISTRY_URL, REQUEST_TIMEOUT_SECS, USER_AGENT};

/// The two registry questions the upgrade engine asks.
#[allow(async_fn_in_trait)]
pub trait RegistryLookup {
    /// Version behind the `latest` dist-tag.
    async fn latest_version(&self, name: &str) -> anyhow::Result<String>;

    /// `peerDependencies` of the latest published version, in declared order.
    async fn peer_dependencies(&self, name: &str) -> anyhow::Result<IndexMap<String, String>>;
}

#[derive(Clone, Debug)]
pub struct PackageInfo {
    pub versions: Value,
    pub dist_tags: HashMap<String, String>,
}

impl PackageInfo {
    pub fn from_json(name: &str, json: &Value) -> anyhow::Result<Self> {
        let dist_tags: HashMap<String, String> = serde_json::from_value(
            json.get("dist-tags")
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        )
        .map_err(|e| anyhow::anyhow!("Failed to parse dist-tags for {}: {}", name, e))?;

        Ok(Self {
            versions: json
                .get("versions")
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
            dist_tags,
        })
    }

    pub fn latest(&self) -> Option<&str> {
        self.dist_tags.get("latest").map(String::as_str)
    }

    /// Peer ranges declared by `version`. Entries whose range is not a string
    /// are dropped.
    pub fn peer_dependencies_of(&self, version: &str) -> IndexMap<String, String> {
        self.versions
            .get(version)
            .and_then(|manifest| manifest.get("peerDependencies"))
            .and_then(Value::as_object)
            .map(|peers| {
                peers
                    .iter()
                    .filter_map(|(name, range)| {
                        range.as_str().map(|r| (name.clone(), r.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
    cache: Mutex<HashMap<String, PackageInfo>>,
}

impl NpmRegistry {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn fetch_package_info(&self, name: &str) -> anyhow::Result<PackageInfo> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached_info) = cache.get(name) {
                return Ok(cached_info.clone());
            }
        }

        let encoded_name = urlencoding::encode(name);
        let url = format!("{}/{encoded_name}", self.base_url);

        let mut attempts = 0;

        loop {
            attempts += 1;
            nxui_logger::debug(&format!("GET {url} (attempt {attempts})"));

            let resp = match self
                .client
                .get(&url)
                .header("Accept", "application/json")
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    if attempts < MAX_ATTEMPTS {
                        backoff(attempts).await;
                        continue;
                    }
                    return Err(if e.is_timeout() {
                        anyhow::anyhow!("Request timeout for {} after {} attempts", name, attempts)
                    } else if e.is_connect() {
                        anyhow::anyhow!("Connection failed for {}: {}", name, e)
                    } else {
                        anyhow::anyhow!("Network error for {}: {}", name, e)
                    });
                }
            };

            let resp = match resp.error_for_status() {
                Ok(resp) => resp,
                Err(e) => {
                    if attempts < MAX_ATTEMPTS && is_transient(e.status()) {
                        backoff(attempts).await;
                        continue;
                    }
                    return Err(anyhow::anyhow!("HTTP error for {}: {}", name, e));
                }
            };

            let json: Value = match resp.json().await {
                Ok(json) => json,
                Err(e) => {
                    if attempts < MAX_ATTEMPTS {
                        backoff(attempts).await;
                        continue;
                    }
                    return Err(anyhow::anyhow!("Failed to parse JSON for {}: {}", name, e));
                }
            };

            let package_info = PackageInfo::from_json(name, &json)?;

            {
                let mut cache = self.cache.lock().await;
                cache.insert(name.to_string(), package_info.clone());
            }

            return Ok(package_info);
        }
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(REGISTRY_URL)
    }
}

impl RegistryLookup for NpmRegistry {
    async fn latest_version(&self, name: &str) -> anyhow::Result<String> {
        let info = self.fetch_package_info(name).await?;
        info.latest()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("No latest dist-tag published for {}", name))
    }

    async fn peer_dependencies(&self, name: &str) -> anyhow::Result<IndexMap<String, String>> {
        let info = self.fetch_package_info(name).await?;
        let latest = info
            .latest()
            .ok_or_else(|| anyhow::anyhow!("No latest dist-tag published for {}", name))?;
        Ok(info.peer_dependencies_of(latest))
    }
}

fn is_transient(status: Option<reqwest::StatusCode>) -> bool {
    matches!(
        status,
        Some(
            reqwest::StatusCode::TOO_MANY_REQUESTS
                | reqwest::StatusCode::INTERNAL_SERVER_ERROR
                | reqwest::StatusCode::BAD_GATEWAY
                | reqwest::StatusCode::SERVICE_UNAVAILABLE
        )
    )
}

async fn backoff(attempt: u32) {
    let delay = std::cmp::min(500 * u64::from(attempt), 5000);
    tokio::time::sleep(Duration::from_millis(delay)).await;
}
