//! Catalog loading from a YAML/JSON document on disk or over http

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::PathBuf;

use super::{Catalog, Course};

/// Where the catalog document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            CatalogSource::Url(raw.to_string())
        } else {
            CatalogSource::File(PathBuf::from(raw))
        }
    }

    async fn read(&self) -> Result<String> {
        match self {
            CatalogSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog file {}", path.display())),
            CatalogSource::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .with_context(|| format!("Failed to fetch catalog from {url}"))?
                    .error_for_status()?;
                Ok(response.text().await?)
            }
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read and decode the catalog. Fails only when the document itself is
/// unreadable; bad entries are dropped.
pub async fn load_catalog(source: &CatalogSource) -> Result<Catalog> {
    let text = source.read().await?;
    let entries = parse_catalog_entries(&text)?;
    let total = entries.len();
    let catalog = build_catalog(entries);

    info!(
        "📚 Loaded {} courses from {} ({} entries dropped)",
        catalog.len(),
        source,
        total - catalog.len()
    );
    Ok(catalog)
}

/// Decode every list element independently.
///
/// Accepts either a top-level list of courses or a mapping with a
/// `courses` list.
pub fn parse_catalog_entries(text: &str) -> Result<Vec<Option<Course>>> {
    let document: Value = serde_yaml::from_str(text).context("Catalog is not valid YAML")?;

    let items = match document {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items,
        Value::Mapping(mut map) => match map.remove("courses") {
            Some(Value::Sequence(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(anyhow!("Catalog `courses` must be a list")),
        },
        _ => return Err(anyhow!("Catalog must be a list of courses")),
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match serde_yaml::from_value::<Course>(item) {
            Ok(course) => validate_course(idx, course),
            Err(e) => {
                warn!("Dropping malformed catalog entry #{idx}: {e}");
                None
            }
        })
        .collect())
}

fn validate_course(idx: usize, mut course: Course) -> Option<Course> {
    course.name = course.name.trim().to_string();
    if course.name.is_empty() {
        warn!("Dropping catalog entry #{idx}: empty course name");
        return None;
    }

    let before = course.lectures.len();
    course.lectures.retain(|l| l.end >= l.start);
    if course.lectures.len() != before {
        warn!(
            "Dropped {} lectures ending before they start in {}",
            before - course.lectures.len(),
            course.name
        );
    }
    course.lectures.sort_by_key(|l| l.start);

    Some(course)
}

/// Drop `None`s and repeated names (first occurrence wins)
fn build_catalog(entries: Vec<Option<Course>>) -> Catalog {
    let mut seen = HashSet::new();
    let unique = entries
        .into_iter()
        .map(|entry| {
            entry.filter(|course| {
                let fresh = seen.insert(course.name.clone());
                if !fresh {
                    warn!("Dropping duplicate catalog course {}", course.name);
                }
                fresh
            })
        })
        .collect();
    Catalog::from_entries(unique)
}
