use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{state::CategorizedPlaylist, utils::compare_names};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
/// How the gallery arranges playlists
pub enum SortMode {
    #[default]
    Carousel,
    Category,
    Alphabetical,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [Self::Carousel, Self::Category, Self::Alphabetical];

    pub fn label(self) -> &'static str {
        match self {
            Self::Carousel => "Carousel View",
            Self::Category => "By Food Type",
            Self::Alphabetical => "Alphabetical",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Carousel => Self::Category,
            Self::Category => Self::Alphabetical,
            Self::Alphabetical => Self::Carousel,
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Carousel => "carousel",
            Self::Category => "category",
            Self::Alphabetical => "alphabetical",
        };
        write!(f, "{s}")
    }
}

/// sorts playlists by name, in the same order as the groups of the grouped view
pub fn sort_alphabetically<'a, I>(playlists: I) -> Vec<&'a CategorizedPlaylist>
where
    I: IntoIterator<Item = &'a CategorizedPlaylist>,
{
    let mut playlists = playlists.into_iter().collect::<Vec<_>>();
    playlists.sort_by(|a, b| compare_names(a.name(), b.name()));
    playlists
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A row of the grouped view, either a category header or one of its playlists
pub enum GroupedRow<'a> {
    Category {
        name: &'static str,
        emoji: &'static str,
        count: usize,
        collapsed: bool,
    },
    Playlist(&'a CategorizedPlaylist),
}

impl GroupedRow<'_> {
    /// the category a row belongs to
    pub fn category(&self) -> &'static str {
        match *self {
            Self::Category { name, .. } => name,
            Self::Playlist(p) => p.category,
        }
    }
}

/// flattens grouped playlists into rows, skipping the playlists of collapsed categories
pub fn grouped_rows<'a>(
    groups: &'a BTreeMap<&'static str, Vec<CategorizedPlaylist>>,
    collapsed: &HashSet<&'static str>,
) -> Vec<GroupedRow<'a>> {
    let mut rows = Vec::new();
    for (&name, playlists) in groups {
        let is_collapsed = collapsed.contains(name);
        rows.push(GroupedRow::Category {
            name,
            emoji: playlists.first().map_or("", |p| p.category_emoji),
            count: playlists.len(),
            collapsed: is_collapsed,
        });
        if !is_collapsed {
            rows.extend(playlists.iter().map(GroupedRow::Playlist));
        }
    }
    rows
}
