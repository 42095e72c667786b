//! Food categories of playlists.
//!
//! A playlist belongs to the first category, in taxonomy order, one of whose
//! keywords appears in its lower-cased and trimmed name. Playlists matching no
//! category fall into [`OTHER_CATEGORY`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    state::{CategorizedPlaylist, Playlist},
    utils::compare_names,
};

pub const OTHER_CATEGORY: &str = "Other";
pub const OTHER_EMOJI: &str = "🍽️";
/// label of the filter chip matching every category
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug)]
pub struct FoodCategory {
    pub name: &'static str,
    pub emoji: &'static str,
    pub keywords: &'static [&'static str],
}

pub const FOOD_CATEGORIES: [FoodCategory; 6] = [
    FoodCategory {
        name: "Breads & Baked Goods",
        emoji: "🍞",
        keywords: &[
            "biscuits",
            "marbled rye",
            "hardtack",
            "pumpernickel",
            "focaccia",
            "sourdough",
            "beignets",
            "glazed donut",
        ],
    },
    FoodCategory {
        name: "Vegetables",
        emoji: "🥬",
        keywords: &[
            "asparagus",
            "green beans",
            "squash",
            "beets",
            "radish",
            "brussels sprouts",
            "cucumber",
            "mustard greens",
            "yams",
            "fried green tomatoes",
            "artichoke",
            "pickles",
        ],
    },
    FoodCategory {
        name: "Fruits",
        emoji: "🍎",
        keywords: &[
            "pomegranate",
            "blueberry",
            "papaya",
            "key lime",
            "passionfruit",
            "lychee",
            "guava",
            "mango",
            "plum",
            "pineapple",
            "strawberries",
            "grapefruit",
        ],
    },
    FoodCategory {
        name: "Sweets & Desserts",
        emoji: "🍰",
        keywords: &[
            "gummy worms",
            "toffee",
            "caramel",
            "pudding",
            "devil's food cake",
            "butterscotch",
            "jelly beans",
            "dulce de leche",
            "box of chocolates",
        ],
    },
    FoodCategory {
        name: "Beverages",
        emoji: "🥤",
        keywords: &[
            "caipirinha",
            "amarula",
            "lemonade",
            "dandelion wine",
            "sarsaparilla",
            "cocoa",
            "champagne",
        ],
    },
    FoodCategory {
        name: "Special Occasions",
        emoji: "🎉",
        keywords: &["mantém a fé", "🎅🏾"],
    },
];

/// finds the category `(name, emoji)` of a playlist name
pub fn categorize(name: &str) -> (&'static str, &'static str) {
    let name = name.trim().to_lowercase();
    FOOD_CATEGORIES
        .iter()
        .find(|category| {
            category
                .keywords
                .iter()
                .any(|keyword| name.contains(&keyword.to_lowercase()))
        })
        .map_or((OTHER_CATEGORY, OTHER_EMOJI), |category| {
            (category.name, category.emoji)
        })
}

/// annotates each playlist with its category, keeping the input order
pub fn categorize_playlists(playlists: Vec<Playlist>) -> Vec<CategorizedPlaylist> {
    playlists
        .into_iter()
        .map(|playlist| {
            let (category, category_emoji) = categorize(&playlist.name);
            CategorizedPlaylist {
                playlist,
                category,
                category_emoji,
            }
        })
        .collect()
}

/// groups playlists by category name, each group sorted by playlist name
pub fn group_playlists_by_category<'a, I>(
    playlists: I,
) -> BTreeMap<&'static str, Vec<CategorizedPlaylist>>
where
    I: IntoIterator<Item = &'a CategorizedPlaylist>,
{
    let mut groups = BTreeMap::<&'static str, Vec<CategorizedPlaylist>>::new();
    for playlist in playlists {
        groups
            .entry(playlist.category)
            .or_default()
            .push(playlist.clone());
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| compare_names(a.name(), b.name()));
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A category filter chip
pub struct CategoryCount {
    pub name: &'static str,
    pub emoji: &'static str,
    pub count: usize,
}

impl CategoryCount {
    /// the category a chip filters by, `None` for the chip matching all categories
    pub fn filter(&self) -> Option<&'static str> {
        (self.name != ALL_CATEGORIES).then_some(self.name)
    }
}

/// counts playlists per category: the `All` chip first, then every non-empty
/// category in taxonomy order, then `Other` if any playlist falls into it
pub fn category_counts(playlists: &[CategorizedPlaylist]) -> Vec<CategoryCount> {
    let count = |name: &str| playlists.iter().filter(|p| p.category == name).count();

    let mut counts = vec![CategoryCount {
        name: ALL_CATEGORIES,
        emoji: OTHER_EMOJI,
        count: playlists.len(),
    }];
    counts.extend(
        FOOD_CATEGORIES
            .iter()
            .map(|category| (category.name, category.emoji))
            .chain(std::iter::once((OTHER_CATEGORY, OTHER_EMOJI)))
            .map(|(name, emoji)| CategoryCount {
                name,
                emoji,
                count: count(name),
            })
            .filter(|c| c.count > 0),
    );
    counts
}

/// keeps the playlists of a category, or all playlists if `category` is `None`
pub fn filter_by_category<'a>(
    playlists: &'a [CategorizedPlaylist],
    category: Option<&str>,
) -> Vec<&'a CategorizedPlaylist> {
    playlists
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn playlist(id: &str, name: &str) -> Playlist {
        Playlist {
            id: id.to_string(),
            name: name.to_string(),
            cover: format!("https://img/{id}"),
            spotify_url: format!("https://open.spotify.com/playlist/{id}"),
            embed_id: id.to_string(),
            description: "Curated playlist".to_string(),
            track_count: 10,
        }
    }

    fn categorized(names: &[&str]) -> Vec<CategorizedPlaylist> {
        categorize_playlists(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| playlist(&format!("p{i}"), name))
                .collect(),
        )
    }

    #[test]
    fn categorizes_by_first_matching_keyword() {
        assert_eq!(categorize("  Sourdough Sundays "), ("Breads & Baked Goods", "🍞"));
        assert_eq!(categorize("FRIED GREEN TOMATOES"), ("Vegetables", "🥬"));
        assert_eq!(categorize("Devil's Food Cake"), ("Sweets & Desserts", "🍰"));
        assert_eq!(categorize("Mantém a Fé"), ("Special Occasions", "🎉"));
        assert_eq!(categorize("🎅🏾 Holiday Mix"), ("Special Occasions", "🎉"));
        // "pineapple" (Fruits) is listed before "champagne" (Beverages)
        assert_eq!(categorize("Pineapple Champagne"), ("Fruits", "🍎"));
        // "glazed donut" (Breads) wins over "caramel" (Sweets)
        assert_eq!(categorize("Caramel Glazed Donut"), ("Breads & Baked Goods", "🍞"));
        assert_eq!(categorize("Road Trip"), (OTHER_CATEGORY, OTHER_EMOJI));
    }

    #[test]
    fn keeps_input_order() {
        let playlists = categorized(&["Lemonade", "Beets", "Toffee"]);
        let names = playlists.iter().map(CategorizedPlaylist::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Lemonade", "Beets", "Toffee"]);
        assert_eq!(playlists[1].category, "Vegetables");
    }

    #[test]
    fn groups_and_sorts_by_name() {
        let playlists = categorized(&["mango tango", "Guava Groove", "Cocoa", "Plum Jazz", "Zzz"]);
        let groups = group_playlists_by_category(&playlists);

        assert_eq!(
            groups.keys().copied().collect::<Vec<_>>(),
            vec!["Beverages", "Fruits", "Other"]
        );
        assert_eq!(
            groups["Fruits"]
                .iter()
                .map(CategorizedPlaylist::name)
                .collect::<Vec<_>>(),
            vec!["Guava Groove", "mango tango", "Plum Jazz"]
        );
    }

    #[test]
    fn counts_categories_in_taxonomy_order() {
        let playlists = categorized(&["Road Trip", "Cocoa", "Biscuits", "Champagne"]);
        let counts = category_counts(&playlists)
            .into_iter()
            .map(|c| (c.name, c.count))
            .collect::<Vec<_>>();
        assert_eq!(
            counts,
            vec![
                ("All", 4),
                ("Breads & Baked Goods", 1),
                ("Beverages", 2),
                ("Other", 1)
            ]
        );
    }

    #[test]
    fn filters_by_category() {
        let playlists = categorized(&["Road Trip", "Cocoa", "Champagne"]);
        assert_eq!(filter_by_category(&playlists, None).len(), 3);
        assert_eq!(filter_by_category(&playlists, Some("Beverages")).len(), 2);
        assert!(filter_by_category(&playlists, Some("Fruits")).is_empty());
    }

    #[test]
    fn handles_empty_input() {
        assert!(categorize_playlists(Vec::new()).is_empty());
        assert!(group_playlists_by_category(&Vec::new()).is_empty());
        assert_eq!(category_counts(&[]).len(), 1);
    }
}
