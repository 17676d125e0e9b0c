//! Test helpers and fixtures.

use atelier_core::{Category, CollectionTag, Project, Settings, Style, Theme};

pub fn sample_project(id: &str, title: &str, category: Category, style: Style) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        category,
        style,
        images: vec![format!("/images/{id}.png")],
        location: "Springfield, IL".to_string(),
        area: "100 sq ft".to_string(),
        year: "2024".to_string(),
        featured: false,
        collection: None,
    }
}

pub fn make_settings(api_url: &str) -> Settings {
    Settings {
        theme: Theme::Light,
        api_url: api_url.to_string(),
        ..Settings::default()
    }
}

pub fn tagged(mut project: Project, tag: CollectionTag) -> Project {
    project.collection = Some(tag);
    project
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_application::{AppContext, LightboxError, LoadState};
    use atelier_core::SortOrder;
    use atelier_storage::ProjectStore;

    #[test]
    fn builds_settings() {
        let settings = make_settings("http://localhost:9000");
        assert_eq!(settings.api_url, "http://localhost:9000");
    }

    #[test]
    fn seeded_catalog_walkthrough() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        assert_eq!(store.len(), 10);

        let kitchen = store.get_by_id("5").expect("id 5 is seeded");
        assert_eq!(kitchen.title, "Minimalist Chef's Kitchen");
        assert!(store.get_by_id("999").is_none());

        let hits = atelier_engine::filter(store.list_all(), "loft", &[], &[]);
        let titles: Vec<&str> = hits.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Industrial Loft Kitchen"]);
        Ok(())
    }

    #[test]
    fn seeded_buckets_partition_the_tagged_records() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        let buckets = atelier_engine::group_by_collection(store.list_all());

        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, store.len());
        for (tag, bucket) in &buckets {
            assert!(bucket.iter().all(|p| p.collection == Some(*tag)));
        }
        Ok(())
    }

    #[test]
    fn sort_orders_on_constructed_pairs() {
        let projects = vec![
            {
                let mut p = sample_project("1", "Zeta Loft", Category::Kitchen, Style::Industrial);
                p.year = "2023".to_string();
                p
            },
            {
                let mut p = sample_project("2", "Alpha House", Category::Bedroom, Style::Modern);
                p.year = "2024".to_string();
                p
            },
        ];
        let refs: Vec<&Project> = projects.iter().collect();

        let by_name = atelier_engine::sorted(&refs, SortOrder::NameAsc);
        assert_eq!(by_name[0].title, "Alpha House");
        assert_eq!(by_name[1].title, "Zeta Loft");

        let newest = atelier_engine::sorted(&refs, SortOrder::Newest);
        assert_eq!(newest[0].year, "2024");
    }

    /// A whole page view: load, search, open a project, walk its gallery.
    #[test]
    fn browse_session_flow() -> anyhow::Result<()> {
        let store = ProjectStore::seeded()?;
        let mut ctx = AppContext::new(make_settings("http://localhost:5000"))
            .with_projects(store.list_all().to_vec());
        assert!(ctx.load.is_ready());
        assert_eq!(ctx.visible_indices().len(), 10);

        ctx.set_query("loft");
        let visible = ctx.visible_indices();
        assert_eq!(visible.len(), 1);

        ctx.select_project(visible[0]);
        let project = ctx.active_project().expect("detail view is open");
        assert_eq!(project.title, "Industrial Loft Kitchen");
        let images = project.images.len();

        ctx.open_lightbox(0).expect("gallery is non-empty");
        for _ in 0..images {
            ctx.lightbox.next();
        }
        assert_eq!(ctx.lightbox.index(), Some(0));
        assert_eq!(
            ctx.lightbox.jump_to(images),
            Err(LightboxError::OutOfRange {
                index: images,
                len: images
            })
        );

        ctx.close_detail();
        assert!(!ctx.lightbox.is_open());
        assert_eq!(ctx.active, None);
        Ok(())
    }

    #[test]
    fn failed_fetch_leaves_an_empty_catalog() {
        let store = ProjectStore::seeded().expect("seed data is valid");
        let mut ctx = AppContext::new(make_settings("http://localhost:5000"))
            .with_projects(store.list_all().to_vec());

        ctx.mark_failed("connection refused");
        assert!(ctx.projects.is_empty());
        assert!(ctx.visible_indices().is_empty());
        assert!(matches!(ctx.load, LoadState::Failed { .. }));
    }

    #[test]
    fn untagged_fixture_lands_in_no_bucket() {
        let projects = vec![
            tagged(
                sample_project("1", "Harbor Office", Category::Office, Style::Minimalist),
                CollectionTag::Trending,
            ),
            sample_project("2", "Alpha House", Category::Bedroom, Style::Modern),
        ];

        let buckets = atelier_engine::group_by_collection(&projects);
        assert_eq!(buckets[&CollectionTag::Trending].len(), 1);
        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 1);
    }
}
