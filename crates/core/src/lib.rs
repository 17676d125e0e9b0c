//! Core domain types for Atelier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Office,
    Commercial,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::LivingRoom,
        Category::Bedroom,
        Category::Kitchen,
        Category::Bathroom,
        Category::Office,
        Category::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LivingRoom => "living-room",
            Category::Bedroom => "bedroom",
            Category::Kitchen => "kitchen",
            Category::Bathroom => "bathroom",
            Category::Office => "office",
            Category::Commercial => "commercial",
        }
    }

    /// Human-readable label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Category::LivingRoom => "Living Room",
            Category::Bedroom => "Bedroom",
            Category::Kitchen => "Kitchen",
            Category::Bathroom => "Bathroom",
            Category::Office => "Office",
            Category::Commercial => "Commercial",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "living-room" => Ok(Category::LivingRoom),
            "bedroom" => Ok(Category::Bedroom),
            "kitchen" => Ok(Category::Kitchen),
            "bathroom" => Ok(Category::Bathroom),
            "office" => Ok(Category::Office),
            "commercial" => Ok(Category::Commercial),
            _ => Err("unknown category"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Modern,
    Contemporary,
    Minimalist,
    Traditional,
    Industrial,
    Scandinavian,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Modern,
        Style::Contemporary,
        Style::Minimalist,
        Style::Traditional,
        Style::Industrial,
        Style::Scandinavian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Modern => "modern",
            Style::Contemporary => "contemporary",
            Style::Minimalist => "minimalist",
            Style::Traditional => "traditional",
            Style::Industrial => "industrial",
            Style::Scandinavian => "scandinavian",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Style::Modern => "Modern",
            Style::Contemporary => "Contemporary",
            Style::Minimalist => "Minimalist",
            Style::Traditional => "Traditional",
            Style::Industrial => "Industrial",
            Style::Scandinavian => "Scandinavian",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Style {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(Style::Modern),
            "contemporary" => Ok(Style::Contemporary),
            "minimalist" => Ok(Style::Minimalist),
            "traditional" => Ok(Style::Traditional),
            "industrial" => Ok(Style::Industrial),
            "scandinavian" => Ok(Style::Scandinavian),
            _ => Err("unknown style"),
        }
    }
}

/// Marketing grouping, distinct from category and style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionTag {
    New,
    Trending,
    Exclusive,
}

impl CollectionTag {
    pub const ALL: [CollectionTag; 3] = [
        CollectionTag::New,
        CollectionTag::Trending,
        CollectionTag::Exclusive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionTag::New => "new",
            CollectionTag::Trending => "trending",
            CollectionTag::Exclusive => "exclusive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollectionTag::New => "New",
            CollectionTag::Trending => "Trending",
            CollectionTag::Exclusive => "Exclusive",
        }
    }
}

impl std::fmt::Display for CollectionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollectionTag {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(CollectionTag::New),
            "trending" => Ok(CollectionTag::Trending),
            "exclusive" => Ok(CollectionTag::Exclusive),
            _ => Err("unknown collection tag"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
        }
    }

    pub fn cycle(&self) -> SortOrder {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::NameAsc,
            SortOrder::NameAsc => SortOrder::NameDesc,
            SortOrder::NameDesc => SortOrder::Newest,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            _ => Err("unknown sort order"),
        }
    }
}

/// Grid width of the collection view. Affects layout only, never which
/// records are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridDensity {
    Two,
    Three,
    Four,
}

impl GridDensity {
    pub fn columns(&self) -> usize {
        match self {
            GridDensity::Two => 2,
            GridDensity::Three => 3,
            GridDensity::Four => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GridDensity::Two => "2",
            GridDensity::Three => "3",
            GridDensity::Four => "4",
        }
    }
}

impl std::fmt::Display for GridDensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GridDensity {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "2" | "two" => Ok(GridDensity::Two),
            "3" | "three" => Ok(GridDensity::Three),
            "4" | "four" => Ok(GridDensity::Four),
            _ => Err("unknown grid density"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err("unknown theme"),
        }
    }
}

/// One portfolio entry. The record set is fixed at load and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub style: Style,
    pub images: Vec<String>,
    pub location: String,
    pub area: String,
    pub year: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionTag>,
}

impl Project {
    /// Record-level invariants, checked at load rather than at render time.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.id.trim().is_empty() {
            return Err("project id is empty");
        }
        if self.images.is_empty() {
            return Err("project has no images");
        }
        Ok(())
    }

    /// Numeric year for chronological ordering; display string otherwise.
    pub fn year_number(&self) -> Option<i32> {
        self.year.trim().parse::<i32>().ok()
    }
}

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub api_url: String,
    pub assets_root: String,
    pub grid_columns: GridDensity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            api_url: DEFAULT_API_URL.to_string(),
            assets_root: String::new(),
            grid_columns: GridDensity::Three,
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        if self.api_url.is_empty() {
            self.api_url = DEFAULT_API_URL.to_string();
        }
        self.assets_root = self.assets_root.trim().to_string();
    }

    pub fn cycle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn cycle_density(&mut self) {
        self.grid_columns = match self.grid_columns {
            GridDensity::Two => GridDensity::Three,
            GridDensity::Three => GridDensity::Four,
            GridDensity::Four => GridDensity::Two,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project {
            id: "1".to_string(),
            title: "Sample".to_string(),
            description: "A sample space.".to_string(),
            category: Category::Kitchen,
            style: Style::Modern,
            images: vec!["/images/sample.png".to_string()],
            location: "Nowhere".to_string(),
            area: "100 sq ft".to_string(),
            year: "2024".to_string(),
            featured: false,
            collection: None,
        }
    }

    #[test]
    fn category_parses_strings() {
        assert_eq!(
            "living-room".parse::<Category>().unwrap(),
            Category::LivingRoom
        );
        assert_eq!(" KITCHEN ".parse::<Category>().unwrap(), Category::Kitchen);
        assert!("garage".parse::<Category>().is_err());
    }

    #[test]
    fn style_round_trips_through_display() {
        for style in Style::ALL {
            assert_eq!(style.as_str().parse::<Style>().unwrap(), style);
        }
    }

    #[test]
    fn collection_tag_parses_strings() {
        assert_eq!(
            "trending".parse::<CollectionTag>().unwrap(),
            CollectionTag::Trending
        );
        assert!("archive".parse::<CollectionTag>().is_err());
    }

    #[test]
    fn sort_order_cycle_rotates() {
        let mut order = SortOrder::Newest;
        for _ in 0..4 {
            order = order.cycle();
        }
        assert_eq!(order, SortOrder::Newest);
    }

    #[test]
    fn density_cycle_rotates() {
        let mut settings = Settings::default();
        assert_eq!(settings.grid_columns, GridDensity::Three);
        settings.cycle_density();
        assert_eq!(settings.grid_columns, GridDensity::Four);
        settings.cycle_density();
        assert_eq!(settings.grid_columns, GridDensity::Two);
        settings.cycle_density();
        assert_eq!(settings.grid_columns, GridDensity::Three);
    }

    #[test]
    fn validate_rejects_empty_images() {
        let mut project = sample();
        project.images.clear();
        assert!(project.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_id() {
        let mut project = sample();
        project.id = "  ".to_string();
        assert!(project.validate().is_err());
    }

    #[test]
    fn year_number_parses_or_none() {
        let mut project = sample();
        assert_eq!(project.year_number(), Some(2024));
        project.year = "TBD".to_string();
        assert_eq!(project.year_number(), None);
    }

    #[test]
    fn settings_normalize_defaults_empty_url() {
        let mut settings = Settings {
            api_url: "  ".to_string(),
            ..Settings::default()
        };
        settings.normalize();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn settings_normalize_strips_trailing_slash() {
        let mut settings = Settings {
            api_url: "http://localhost:5000/".to_string(),
            ..Settings::default()
        };
        settings.normalize();
        assert_eq!(settings.api_url, "http://localhost:5000");
    }
}
