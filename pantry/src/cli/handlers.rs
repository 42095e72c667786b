use anyhow::{Context as _, Result};
use clap::ArgMatches;
use serde::Serialize;

use crate::{
    carousel::{self, SlotTransform},
    client::Client,
    config,
    state::CategorizedPlaylist,
    taxonomy,
    view::{self, SortMode},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CarouselEntry<'a> {
    index: usize,
    offset: i32,
    transform: SlotTransform,
    css: String,
    filter: String,
    playlist: &'a CategorizedPlaylist,
}

/// fetches and categorizes the configured user's playlists
fn fetch_playlists() -> Result<Vec<CategorizedPlaylist>> {
    let app_config = &config::get_config().app_config;
    let client = Client::from_config(app_config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build the tokio runtime")?;
    let playlists = runtime
        .block_on(client.fetch_playlists(&app_config.user_id, false))
        .with_context(|| format!("failed to get playlists of user {}", app_config.user_id))?;

    Ok(taxonomy::categorize_playlists(playlists))
}

fn playlists_json(
    playlists: &[CategorizedPlaylist],
    mode: SortMode,
    category: Option<&str>,
) -> Result<serde_json::Value> {
    let category = category.filter(|c| *c != taxonomy::ALL_CATEGORIES);
    let playlists = taxonomy::filter_by_category(playlists, category);

    let value = match mode {
        SortMode::Carousel => serde_json::to_value(playlists)?,
        SortMode::Category => {
            serde_json::to_value(taxonomy::group_playlists_by_category(playlists))?
        }
        SortMode::Alphabetical => serde_json::to_value(view::sort_alphabetically(playlists))?,
    };
    Ok(value)
}

fn carousel_json(playlists: &[CategorizedPlaylist], index: usize) -> Result<serde_json::Value> {
    let entries = carousel::visible_slots(playlists.len(), index)
        .into_iter()
        .map(|slot| {
            let transform = SlotTransform::for_offset(slot.offset);
            CarouselEntry {
                index: slot.index,
                offset: slot.offset,
                css: transform.css(),
                filter: transform.filter(),
                transform,
                playlist: &playlists[slot.index],
            }
        })
        .collect::<Vec<_>>();
    Ok(serde_json::to_value(entries)?)
}

fn handle_get_subcommand(args: &ArgMatches) -> Result<()> {
    let (cmd, args) = args.subcommand().context("get subcommand is required")?;
    let playlists = fetch_playlists()?;

    let value = match cmd {
        "playlists" => {
            let mode = args
                .get_one::<SortMode>("mode")
                .copied()
                .unwrap_or(config::get_config().app_config.default_mode);
            let category = args.get_one::<String>("category").map(String::as_str);
            playlists_json(&playlists, mode, category)?
        }
        "categories" => serde_json::to_value(taxonomy::category_counts(&playlists))?,
        "carousel" => {
            let index = args.get_one::<usize>("index").copied().unwrap_or_default();
            carousel_json(&playlists, index)?
        }
        cmd => anyhow::bail!("unknown get subcommand: {cmd}"),
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn handle_cli_subcommand(cmd: &str, args: &ArgMatches) -> Result<()> {
    match cmd {
        "get" => handle_get_subcommand(args),
        cmd => anyhow::bail!("unknown subcommand: {cmd}"),
    }
}
