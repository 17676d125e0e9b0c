//! In-memory project store and settings persistence.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use atelier_core::{Category, Project, Settings, Style};

mod seed;

pub use seed::seed_projects;

/// Read-only record set, validated at construction. Insertion order is the
/// only ordering guarantee.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects: Vec<Project>,
    index_by_id: HashMap<String, usize>,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> anyhow::Result<Self> {
        let mut index_by_id = HashMap::with_capacity(projects.len());
        for (idx, project) in projects.iter().enumerate() {
            project
                .validate()
                .map_err(|err| anyhow::anyhow!("project {:?}: {err}", project.id))?;
            if index_by_id.insert(project.id.clone(), idx).is_some() {
                anyhow::bail!("duplicate project id {:?}", project.id);
            }
        }
        Ok(Self {
            projects,
            index_by_id,
        })
    }

    /// The fixed portfolio this studio ships with.
    pub fn seeded() -> anyhow::Result<Self> {
        Self::new(seed_projects())
    }

    pub fn list_all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Project> {
        self.index_by_id
            .get(id)
            .and_then(|idx| self.projects.get(*idx))
    }

    pub fn list_by_category(&self, category: Category) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    pub fn list_by_style(&self, style: Style) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| p.style == style)
            .cloned()
            .collect()
    }

    /// Creation path. Kept off every HTTP route; the served set stays fixed
    /// for the process lifetime.
    pub fn add(&mut self, project: Project) -> anyhow::Result<()> {
        project
            .validate()
            .map_err(|err| anyhow::anyhow!("project {:?}: {err}", project.id))?;
        if self.index_by_id.contains_key(&project.id) {
            anyhow::bail!("duplicate project id {:?}", project.id);
        }
        self.index_by_id
            .insert(project.id.clone(), self.projects.len());
        self.projects.push(project);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Client settings, stored as a single JSON document.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Missing file loads defaults; a malformed file is an error rather than
    /// silently resetting the user's configuration.
    pub fn load(&self) -> anyhow::Result<Settings> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read settings at {}", self.path.display()));
            }
        };
        let mut settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("parse settings at {}", self.path.display()))?;
        settings.normalize();
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        let mut settings = settings.clone();
        settings.normalize();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create settings dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&settings)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("write settings at {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Theme;

    fn sample(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {id}"),
            description: "A space.".to_string(),
            category: Category::Kitchen,
            style: Style::Modern,
            images: vec!["/images/a.png".to_string()],
            location: "Here".to_string(),
            area: "100 sq ft".to_string(),
            year: "2024".to_string(),
            featured: false,
            collection: None,
        }
    }

    #[test]
    fn seeded_store_has_ten_records() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        assert_eq!(store.len(), 10);
        Ok(())
    }

    #[test]
    fn get_by_id_finds_known_record() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        let project = store.get_by_id("5").expect("id 5 is seeded");
        assert_eq!(project.title, "Minimalist Chef's Kitchen");
        Ok(())
    }

    #[test]
    fn get_by_id_misses_unknown_record() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        assert!(store.get_by_id("999").is_none());
        Ok(())
    }

    #[test]
    fn list_all_preserves_insertion_order() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        let ids: Vec<&str> = store.list_all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
        Ok(())
    }

    #[test]
    fn list_by_category_filters() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        let kitchens = store.list_by_category(Category::Kitchen);
        assert_eq!(kitchens.len(), 2);
        assert!(kitchens.iter().all(|p| p.category == Category::Kitchen));
        Ok(())
    }

    #[test]
    fn list_by_style_filters() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        let modern = store.list_by_style(Style::Modern);
        assert!(!modern.is_empty());
        assert!(modern.iter().all(|p| p.style == Style::Modern));
        Ok(())
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = ProjectStore::new(vec![sample("1"), sample("1")]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_record_without_images() {
        let mut project = sample("1");
        project.images.clear();
        assert!(ProjectStore::new(vec![project]).is_err());
    }

    #[test]
    fn add_appends_and_indexes() -> anyhow::Result<()> {
        let mut store = ProjectStore::new(vec![sample("1")])?;
        store.add(sample("2"))?;
        assert_eq!(store.len(), 2);
        assert!(store.get_by_id("2").is_some());
        assert!(store.add(sample("2")).is_err());
        Ok(())
    }

    #[test]
    fn seeded_records_deserialize_defaults() -> anyhow::Result<()> {
        // featured / collection are optional on the wire.
        let json = r#"{
            "id": "9",
            "title": "T",
            "description": "D",
            "category": "office",
            "style": "modern",
            "images": ["/images/a.png"],
            "location": "L",
            "area": "A",
            "year": "2023"
        }"#;
        let project: Project = serde_json::from_str(json)?;
        assert!(!project.featured);
        assert_eq!(project.collection, None);
        Ok(())
    }

    #[test]
    fn settings_roundtrip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let mut settings = store.load()?;
        settings.theme = Theme::Dark;
        settings.api_url = "http://localhost:9000/".to_string();
        store.save(&settings)?;

        let settings2 = store.load()?;
        assert_eq!(settings2.theme, Theme::Dark);
        assert_eq!(settings2.api_url, "http://localhost:9000");
        Ok(())
    }

    #[test]
    fn settings_load_defaults_when_missing() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = SettingsStore::new(dir.path().join("absent.json"));
        let settings = store.load()?;
        assert_eq!(settings.theme, Theme::Light);
        Ok(())
    }
}
