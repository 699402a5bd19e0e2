//! Snapshot generation: fetch a resource through the proxy and emit a
//! self-contained, client-rendered component with the data baked in.

use std::path::{Path, PathBuf};

use github_client::{FetchOptions, GithubClient, GithubError};
use mention_core::{parse_github_url, GithubResource, ResourceKind};

use crate::registry::RegistryItem;
use crate::slug::{component_name_for, slug_for};

/// Fixed table mapping resource kinds to the view component spliced into
/// generated output. A kind missing here takes the unsupported fallback.
const VIEW_FILES: [(ResourceKind, &str, &str); 4] = [
    (ResourceKind::Pull, "github-pull-view.tsx", "GithubPullView"),
    (ResourceKind::Issue, "github-issue-view.tsx", "GithubIssueView"),
    (ResourceKind::User, "github-user-view.tsx", "GithubUserView"),
    (ResourceKind::Repo, "github-repo-view.tsx", "GithubRepoView"),
];

/// A generated, embeddable snapshot of a GitHub resource.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub resource: GithubResource,
    pub code: String,
    pub component_name: String,
    pub slug: String,
    pub registry: RegistryItem,
}

pub struct SnapshotGenerator {
    client: GithubClient,
    base_url: Option<String>,
    views_dir: PathBuf,
}

impl SnapshotGenerator {
    /// Generator fetching through the proxy at `base_url`, splicing view
    /// sources from `views_dir`.
    pub fn new(client: GithubClient, base_url: Option<String>, views_dir: PathBuf) -> Self {
        Self {
            client,
            base_url,
            views_dir,
        }
    }

    /// Default views directory: the crate's bundled `views/` folder.
    pub fn default_views_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("views")
    }

    /// Fetch `url` (server mode forced on) and emit the snapshot artifact.
    pub fn generate(&self, url: &str) -> Result<Snapshot, GithubError> {
        let options = FetchOptions {
            use_server: true,
            base_url: self.base_url.clone(),
        };
        let resource = self.client.get_resource(url, &options)?;

        let parsed = parse_github_url(url);
        let slug = slug_for(&parsed, url);
        let component_name = component_name_for(&slug);
        let code = self.render(&resource, &component_name)?;
        let registry = RegistryItem::for_snapshot(&slug, &component_name, &code, url);

        Ok(Snapshot {
            resource,
            code,
            component_name,
            slug,
            registry,
        })
    }

    fn render(&self, resource: &GithubResource, component_name: &str) -> Result<String, GithubError> {
        let data = serde_json::to_string_pretty(resource)?;

        let view = VIEW_FILES
            .iter()
            .find(|(kind, _, _)| *kind == resource.kind())
            .and_then(|(_, file, view_name)| {
                let source = std::fs::read_to_string(self.views_dir.join(file)).ok()?;
                Some((source, *view_name))
            });

        // An unreadable view file or a kind missing from the table degrades
        // to a placeholder instead of failing the whole generation.
        let Some((view_source, view_name)) = view else {
            return Ok(unsupported_component(component_name));
        };

        Ok(format!(
            "\"use client\";\n\n{view}\n\nconst data = {data} as const;\n\nexport function {name}() {{\n  return <{view_name} resource={{data}} />;\n}}\n",
            view = view_source.trim_end(),
            data = data,
            name = component_name,
            view_name = view_name,
        ))
    }
}

fn unsupported_component(component_name: &str) -> String {
    format!(
        "\"use client\";\n\nexport function {component_name}() {{\n  return (\n    <div className=\"github-mention github-mention-unsupported\">\n      Unsupported GitHub resource\n    </div>\n  );\n}}\n"
    )
}
