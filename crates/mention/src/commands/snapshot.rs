use crate::cli::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use mention_snapshot::SnapshotGenerator;
use std::path::{Path, PathBuf};

pub fn handle_snapshot(
    url: &str,
    out: Option<&Path>,
    registry: bool,
    base_url: Option<String>,
    views_dir: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let generator = SnapshotGenerator::new(
        super::client(),
        base_url,
        views_dir.unwrap_or_else(SnapshotGenerator::default_views_dir),
    );
    let snapshot = generator.generate(url)?;

    if let Some(dir) = out {
        std::fs::create_dir_all(dir)?;
        let component_path = dir.join(format!("github-mention-{}.tsx", snapshot.slug));
        std::fs::write(&component_path, &snapshot.code)?;
        let manifest_path = dir.join(format!("github-mention-{}.json", snapshot.slug));
        std::fs::write(
            &manifest_path,
            serde_json::to_string_pretty(&snapshot.registry)?,
        )?;

        match format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "success": true,
                        "component": component_path,
                        "registry": manifest_path,
                        "slug": snapshot.slug,
                        "componentName": snapshot.component_name,
                    }))?
                );
            }
            OutputFormat::Text => {
                println!("Wrote {}", component_path.display().to_string().cyan());
                println!("Wrote {}", manifest_path.display().to_string().cyan());
            }
        }
        return Ok(());
    }

    if registry {
        println!("{}", serde_json::to_string_pretty(&snapshot.registry)?);
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "resource": snapshot.resource,
                    "registry": snapshot.registry,
                    "code": snapshot.code,
                    "componentName": snapshot.component_name,
                    "slug": snapshot.slug,
                }))?
            );
        }
        OutputFormat::Text => {
            print!("{}", snapshot.code);
        }
    }

    Ok(())
}
