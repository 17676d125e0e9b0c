//! Per-session view state for the catalog client.
//!
//! All of it lives in one serializable [`AppContext`] owned by the page
//! loop and mutated only through named transitions, so the behavior is
//! testable without a terminal.

use atelier_core::{Category, CollectionTag, Project, Settings, SortOrder, Style};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of the one fetch a page view performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    Loading,
    Ready,
    Failed { reason: String },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LightboxError {
    #[error("no images to view")]
    Empty,
    #[error("image index {index} out of range (gallery has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Full-screen image viewer: closed, or open at an index that wraps around
/// a gallery whose length is captured at open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lightbox {
    Closed,
    Open { index: usize, len: usize },
}

impl Default for Lightbox {
    fn default() -> Self {
        Lightbox::Closed
    }
}

impl Lightbox {
    /// Opening an empty gallery fails and leaves the viewer closed; a start
    /// index past the end clamps to the last image.
    pub fn open(&mut self, start: usize, len: usize) -> Result<(), LightboxError> {
        if len == 0 {
            return Err(LightboxError::Empty);
        }
        *self = Lightbox::Open {
            index: start.min(len - 1),
            len,
        };
        Ok(())
    }

    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }

    /// Wraps from the last image to the first. No-op while closed.
    pub fn next(&mut self) {
        if let Lightbox::Open { index, len } = self {
            *index = (*index + 1) % *len;
        }
    }

    /// Wraps from the first image to the last. No-op while closed.
    pub fn previous(&mut self) {
        if let Lightbox::Open { index, len } = self {
            *index = (*index + *len - 1) % *len;
        }
    }

    /// An out-of-range target leaves the current position unchanged.
    pub fn jump_to(&mut self, target: usize) -> Result<(), LightboxError> {
        match self {
            Lightbox::Closed => Ok(()),
            Lightbox::Open { index, len } => {
                if target < *len {
                    *index = target;
                    Ok(())
                } else {
                    Err(LightboxError::OutOfRange {
                        index: target,
                        len: *len,
                    })
                }
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Closed => None,
            Lightbox::Open { index, .. } => Some(*index),
        }
    }
}

/// Transient collection-browse state. Display density is a persisted
/// setting instead; it never changes which records a bucket holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionBrowse {
    pub tag: CollectionTag,
    pub category: Option<Category>,
    pub sort: SortOrder,
}

impl Default for CollectionBrowse {
    fn default() -> Self {
        Self {
            tag: CollectionTag::New,
            category: None,
            sort: SortOrder::Newest,
        }
    }
}

impl CollectionBrowse {
    pub fn select_tag(&mut self, tag: CollectionTag) {
        self.tag = tag;
        self.category = None;
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.cycle();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppContext {
    pub settings: Settings,
    pub projects: Vec<Project>,
    pub load: LoadState,
    /// Catalog cursor into the full list.
    pub selected: usize,
    pub query: String,
    pub categories: Vec<Category>,
    pub styles: Vec<Style>,
    /// Open detail view, if any. At most one record is active.
    pub active: Option<usize>,
    pub lightbox: Lightbox,
    pub collection: CollectionBrowse,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            projects: Vec::new(),
            load: LoadState::Loading,
            selected: 0,
            query: String::new(),
            categories: Vec::new(),
            styles: Vec::new(),
            active: None,
            lightbox: Lightbox::Closed,
            collection: CollectionBrowse::default(),
        }
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self.load = LoadState::Ready;
        self.selected = self.selected.min(self.projects.len().saturating_sub(1));
        self
    }

    /// A failed fetch is an empty catalog with a visible reason, terminal
    /// for this page view until the user refreshes.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.projects.clear();
        self.load = LoadState::Failed {
            reason: reason.into(),
        };
        self.selected = 0;
        self.close_detail();
    }

    /// Indices of records passing the current criteria, in catalog order.
    pub fn visible_indices(&self) -> Vec<usize> {
        atelier_engine::filter_indices(&self.projects, &self.query, &self.categories, &self.styles)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    pub fn toggle_style(&mut self, style: Style) {
        if let Some(pos) = self.styles.iter().position(|s| *s == style) {
            self.styles.remove(pos);
        } else {
            self.styles.push(style);
        }
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.categories.clear();
        self.styles.clear();
    }

    pub fn has_filters(&self) -> bool {
        !self.query.trim().is_empty() || !self.categories.is_empty() || !self.styles.is_empty()
    }

    /// Opens the detail view. Selecting while another record is open simply
    /// replaces it; an index past the list is ignored.
    pub fn select_project(&mut self, idx: usize) {
        if idx < self.projects.len() {
            self.selected = idx;
            self.active = Some(idx);
            self.lightbox.close();
        }
    }

    /// Closing the detail view also tears down the lightbox it owns.
    pub fn close_detail(&mut self) {
        self.active = None;
        self.lightbox.close();
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active.and_then(|idx| self.projects.get(idx))
    }

    pub fn open_lightbox(&mut self, start: usize) -> Result<(), LightboxError> {
        let len = match self.active_project() {
            Some(project) => project.images.len(),
            None => return Err(LightboxError::Empty),
        };
        self.lightbox.open(start, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, images: usize) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {id}"),
            description: "A space.".to_string(),
            category: Category::Kitchen,
            style: Style::Modern,
            images: (0..images).map(|i| format!("/images/{id}_{i}.png")).collect(),
            location: "Here".to_string(),
            area: "100 sq ft".to_string(),
            year: "2024".to_string(),
            featured: false,
            collection: None,
        }
    }

    fn ready_ctx(records: usize) -> AppContext {
        let projects = (1..=records).map(|i| project(&i.to_string(), 3)).collect();
        AppContext::new(Settings::default()).with_projects(projects)
    }

    #[test]
    fn next_is_cyclic() {
        for start in 0..5 {
            let mut lightbox = Lightbox::Closed;
            lightbox.open(start, 5).unwrap();
            for _ in 0..5 {
                lightbox.next();
            }
            assert_eq!(lightbox.index(), Some(start));
        }
    }

    #[test]
    fn previous_is_cyclic() {
        for start in 0..5 {
            let mut lightbox = Lightbox::Closed;
            lightbox.open(start, 5).unwrap();
            for _ in 0..5 {
                lightbox.previous();
            }
            assert_eq!(lightbox.index(), Some(start));
        }
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open(0, 4).unwrap();
        lightbox.previous();
        assert_eq!(lightbox.index(), Some(3));
    }

    #[test]
    fn jump_to_out_of_range_leaves_index_unchanged() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open(2, 4).unwrap();
        let err = lightbox.jump_to(4).unwrap_err();
        assert_eq!(err, LightboxError::OutOfRange { index: 4, len: 4 });
        assert_eq!(lightbox.index(), Some(2));
    }

    #[test]
    fn open_empty_gallery_fails_closed() {
        let mut lightbox = Lightbox::Closed;
        assert_eq!(lightbox.open(0, 0), Err(LightboxError::Empty));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn open_clamps_start_index() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open(9, 3).unwrap();
        assert_eq!(lightbox.index(), Some(2));
    }

    #[test]
    fn navigation_is_noop_while_closed() {
        let mut lightbox = Lightbox::Closed;
        lightbox.next();
        lightbox.previous();
        assert_eq!(lightbox.jump_to(1), Ok(()));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn select_replaces_active_without_stacking() {
        let mut ctx = ready_ctx(3);
        ctx.select_project(0);
        ctx.open_lightbox(1).unwrap();
        ctx.select_project(2);
        assert_eq!(ctx.active, Some(2));
        // Switching records closed the previous lightbox.
        assert!(!ctx.lightbox.is_open());
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut ctx = ready_ctx(2);
        ctx.select_project(9);
        assert_eq!(ctx.active, None);
    }

    #[test]
    fn close_detail_resets_lightbox() {
        let mut ctx = ready_ctx(1);
        ctx.select_project(0);
        ctx.open_lightbox(0).unwrap();
        ctx.close_detail();
        assert_eq!(ctx.active, None);
        assert!(!ctx.lightbox.is_open());
    }

    #[test]
    fn open_lightbox_without_detail_fails() {
        let mut ctx = ready_ctx(1);
        assert_eq!(ctx.open_lightbox(0), Err(LightboxError::Empty));
    }

    #[test]
    fn clear_filters_resets_all_three_dimensions() {
        let mut ctx = ready_ctx(2);
        ctx.set_query("loft");
        ctx.toggle_category(Category::Kitchen);
        ctx.toggle_style(Style::Modern);
        assert!(ctx.has_filters());

        ctx.clear_filters();
        assert!(!ctx.has_filters());
        assert_eq!(ctx.visible_indices().len(), 2);
    }

    #[test]
    fn toggle_twice_removes() {
        let mut ctx = ready_ctx(1);
        ctx.toggle_category(Category::Office);
        ctx.toggle_category(Category::Office);
        assert!(ctx.categories.is_empty());
    }

    #[test]
    fn mark_failed_empties_catalog() {
        let mut ctx = ready_ctx(3);
        ctx.select_project(1);
        ctx.mark_failed("connection refused");
        assert!(ctx.projects.is_empty());
        assert_eq!(ctx.active, None);
        assert_eq!(
            ctx.load,
            LoadState::Failed {
                reason: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn collection_browse_resets_category_on_tag_change() {
        let mut browse = CollectionBrowse::default();
        browse.set_category(Some(Category::Kitchen));
        browse.select_tag(CollectionTag::Exclusive);
        assert_eq!(browse.tag, CollectionTag::Exclusive);
        assert_eq!(browse.category, None);
    }
}
