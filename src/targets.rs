//! The static set of monitored endpoints

use serde::Serialize;

/// One monitored remote endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    /// Stable identifier; records and read models are keyed by it.
    pub url: String,
    pub description: String,
    /// Full address requested by the probe.
    pub endpoint: String,
}

impl Target {
    pub fn new(name: &str, url: &str, description: &str, endpoint: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

/// Column key used by the hourly chart series.
pub fn chart_key(url: &str) -> String {
    url.replace('.', "_")
}

/// Mojang and Minecraft public services.
pub fn default_targets() -> Vec<Target> {
    [
        ("minecraft.net", "Main Minecraft website"),
        ("session.minecraft.net", "Session authentication for multiplayer"),
        ("account.mojang.com", "Mojang account management"),
        ("sessionserver.mojang.com", "Session server for login/auth"),
        ("api.mojang.com", "API for Minecraft services"),
        ("textures.minecraft.net", "Minecraft skins and textures"),
    ]
    .into_iter()
    .map(|(host, description)| Target::new(host, host, description, &format!("https://{}", host)))
    .collect()
}
