//! Catalog queries: filtering, grouping, sorting.
//!
//! Everything here is a pure function over a borrowed record slice. The set
//! is small and fixed, so queries re-run from scratch on every criteria
//! change; result order always follows input order unless a sort is asked
//! for explicitly.

use std::collections::BTreeMap;

use atelier_core::{Category, CollectionTag, Project, SortOrder, Style};

/// A record matches when every dimension accepts it: an empty query and
/// empty selection sets accept everything, a non-empty selection set accepts
/// membership.
pub fn filter<'a>(
    projects: &'a [Project],
    query: &str,
    categories: &[Category],
    styles: &[Style],
) -> Vec<&'a Project> {
    filter_indices(projects, query, categories, styles)
        .into_iter()
        .map(|idx| &projects[idx])
        .collect()
}

/// Index-returning variant of [`filter`] for callers that keep their own
/// selection bookkeeping against the full list.
pub fn filter_indices(
    projects: &[Project],
    query: &str,
    categories: &[Category],
    styles: &[Style],
) -> Vec<usize> {
    projects
        .iter()
        .enumerate()
        .filter(|(_, project)| {
            matches_query(project, query)
                && (categories.is_empty() || categories.contains(&project.category))
                && (styles.is_empty() || styles.contains(&project.style))
        })
        .map(|(idx, _)| idx)
        .collect()
}

fn matches_query(project: &Project, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let query = query.to_ascii_lowercase();

    project.title.to_ascii_lowercase().contains(&query)
        || project.description.to_ascii_lowercase().contains(&query)
        || project.location.to_ascii_lowercase().contains(&query)
}

/// One bucket per fixed tag, in tag order. Untagged records land in no
/// bucket.
pub fn group_by_collection(projects: &[Project]) -> BTreeMap<CollectionTag, Vec<&Project>> {
    let mut buckets: BTreeMap<CollectionTag, Vec<&Project>> = BTreeMap::new();
    for tag in CollectionTag::ALL {
        buckets.insert(tag, Vec::new());
    }
    for project in projects {
        if let Some(tag) = project.collection
            && let Some(bucket) = buckets.get_mut(&tag)
        {
            bucket.push(project);
        }
    }
    buckets
}

/// A single collection bucket, optionally narrowed to one category.
pub fn bucket<'a>(
    projects: &'a [Project],
    tag: CollectionTag,
    category: Option<Category>,
) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| p.collection == Some(tag))
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect()
}

/// Stable sort by the chosen ordering. Years compare numerically; records
/// with an unparsable year sort after parsable ones in either direction.
pub fn sorted<'a>(projects: &[&'a Project], order: SortOrder) -> Vec<&'a Project> {
    let mut out = projects.to_vec();
    match order {
        SortOrder::Newest => {
            out.sort_by_key(|p| std::cmp::Reverse(p.year_number().unwrap_or(i32::MIN)));
        }
        SortOrder::Oldest => {
            out.sort_by_key(|p| p.year_number().unwrap_or(i32::MAX));
        }
        SortOrder::NameAsc => {
            out.sort_by(|a, b| compare_titles(a, b));
        }
        SortOrder::NameDesc => {
            out.sort_by(|a, b| compare_titles(b, a));
        }
    }
    out
}

fn compare_titles(a: &Project, b: &Project) -> std::cmp::Ordering {
    a.title
        .to_ascii_lowercase()
        .cmp(&b.title.to_ascii_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

/// Featured records for the home strip, input order, capped.
pub fn featured(projects: &[Project], limit: usize) -> Vec<&Project> {
    projects.iter().filter(|p| p.featured).take(limit).collect()
}

/// Records sharing a category or style with `project`, excluding the record
/// itself. Input order, capped.
pub fn related<'a>(projects: &'a [Project], project: &Project, limit: usize) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| p.id != project.id)
        .filter(|p| p.category == project.category || p.style == project.style)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, title: &str, category: Category, style: Style, year: &str) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} description"),
            category,
            style,
            images: vec!["/images/a.png".to_string()],
            location: "Springfield, IL".to_string(),
            area: "100 sq ft".to_string(),
            year: year.to_string(),
            featured: false,
            collection: None,
        }
    }

    fn catalog() -> Vec<Project> {
        vec![
            project("1", "Zeta Loft", Category::Kitchen, Style::Industrial, "2023"),
            project("2", "Alpha House", Category::Bedroom, Style::Modern, "2024"),
            project(
                "3",
                "Harbor Office",
                Category::Office,
                Style::Minimalist,
                "2022",
            ),
        ]
    }

    #[test]
    fn empty_criteria_return_everything_in_order() {
        let projects = catalog();
        let out = filter(&projects, "", &[], &[]);
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn query_matches_title_description_location() {
        let mut projects = catalog();
        projects[2].location = "Harborview, WA".to_string();

        let by_title = filter(&projects, "LOFT", &[], &[]);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "1");

        let by_description = filter(&projects, "alpha house desc", &[], &[]);
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, "2");

        let by_location = filter(&projects, "harborview", &[], &[]);
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].id, "3");
    }

    #[test]
    fn dimensions_intersect() {
        let projects = catalog();

        let kitchens = filter(&projects, "", &[Category::Kitchen], &[]);
        assert_eq!(kitchens.len(), 1);

        // Query matches record 1, category admits record 2 only: disjoint.
        let none = filter(&projects, "zeta", &[Category::Bedroom], &[]);
        assert!(none.is_empty());

        // All three dimensions agree on record 2.
        let both = filter(&projects, "alpha", &[Category::Bedroom], &[Style::Modern]);
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, "2");
    }

    #[test]
    fn style_set_is_any_match() {
        let projects = catalog();
        let out = filter(&projects, "", &[], &[Style::Modern, Style::Industrial]);
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn grouping_partitions_by_tag() {
        let mut projects = catalog();
        projects[0].collection = Some(CollectionTag::Trending);
        projects[1].collection = Some(CollectionTag::New);

        let buckets = group_by_collection(&projects);
        assert_eq!(buckets[&CollectionTag::Trending].len(), 1);
        assert_eq!(buckets[&CollectionTag::Trending][0].id, "1");
        assert_eq!(buckets[&CollectionTag::New].len(), 1);
        assert!(buckets[&CollectionTag::Exclusive].is_empty());

        // Untagged record 3 appears in no bucket.
        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn bucket_narrows_by_category() {
        let mut projects = catalog();
        projects[0].collection = Some(CollectionTag::Trending);
        projects[1].collection = Some(CollectionTag::Trending);

        let all = bucket(&projects, CollectionTag::Trending, None);
        assert_eq!(all.len(), 2);

        let kitchens = bucket(&projects, CollectionTag::Trending, Some(Category::Kitchen));
        assert_eq!(kitchens.len(), 1);
        assert_eq!(kitchens[0].id, "1");
    }

    #[test]
    fn sort_name_asc() {
        let projects = catalog();
        let refs: Vec<&Project> = projects.iter().collect();
        let out = sorted(&refs, SortOrder::NameAsc);
        let titles: Vec<&str> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Alpha House", "Harbor Office", "Zeta Loft"]);
    }

    #[test]
    fn sort_newest_puts_latest_year_first() {
        let projects = catalog();
        let refs: Vec<&Project> = projects.iter().collect();
        let out = sorted(&refs, SortOrder::Newest);
        let years: Vec<&str> = out.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, ["2024", "2023", "2022"]);
    }

    #[test]
    fn sort_oldest_reverses_newest() {
        let projects = catalog();
        let refs: Vec<&Project> = projects.iter().collect();
        let out = sorted(&refs, SortOrder::Oldest);
        let years: Vec<&str> = out.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, ["2022", "2023", "2024"]);
    }

    #[test]
    fn unparsable_years_sort_last() {
        let mut projects = catalog();
        projects[1].year = "in progress".to_string();
        let refs: Vec<&Project> = projects.iter().collect();

        let newest = sorted(&refs, SortOrder::Newest);
        assert_eq!(newest.last().unwrap().id, "2");

        let oldest = sorted(&refs, SortOrder::Oldest);
        assert_eq!(oldest.last().unwrap().id, "2");
    }

    #[test]
    fn featured_caps_in_input_order() {
        let mut projects = catalog();
        for p in &mut projects {
            p.featured = true;
        }
        let out = featured(&projects, 2);
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn related_shares_category_or_style_and_excludes_self() {
        let mut projects = catalog();
        projects.push(project(
            "4",
            "Steel Kitchen",
            Category::Kitchen,
            Style::Modern,
            "2024",
        ));

        let anchor = projects[0].clone();
        let out = related(&projects, &anchor, 3);
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        // Only record 4 shares a dimension (category) with the loft kitchen.
        assert_eq!(ids, ["4"]);
    }

    #[test]
    fn related_respects_limit() {
        let projects: Vec<Project> = (1..=5)
            .map(|i| {
                project(
                    &i.to_string(),
                    &format!("Kitchen {i}"),
                    Category::Kitchen,
                    Style::Modern,
                    "2024",
                )
            })
            .collect();
        let out = related(&projects, &projects[0], 3);
        assert_eq!(out.len(), 3);
    }
}
