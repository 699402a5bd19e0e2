use serde::{Deserialize, Serialize};

/// shadcn-style registry item describing a generated snapshot component,
/// consumable by `shadcn add <url>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryItem {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: String,
    pub files: Vec<RegistryFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryFile {
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

impl RegistryItem {
    pub fn for_snapshot(slug: &str, component_name: &str, code: &str, source_url: &str) -> Self {
        Self {
            schema: "https://ui.shadcn.com/schema/registry-item.json".to_string(),
            name: format!("github-mention-{slug}"),
            item_type: "registry:block".to_string(),
            title: component_name.to_string(),
            description: format!("Static GitHub mention card for {source_url}"),
            files: vec![RegistryFile {
                path: format!("components/github-mention-{slug}.tsx"),
                content: code.to_string(),
                file_type: "registry:component".to_string(),
            }],
        }
    }
}
