use std::cmp::Ordering;
use std::collections::HashMap;

use super::{Asset, AssetKind, DownloadState};

/// Fold episodes into one synthesized series asset per series.
///
/// Movies pass through. A series asset takes its id from the series id, its
/// title from the episodes' series title, poster and date from the first
/// episode, and its state from [`DownloadState::aggregate`]. The result is
/// ordered newest download first.
pub fn group_by_series(assets: Vec<Asset>) -> Vec<Asset> {
    let mut listed: Vec<Asset> = Vec::new();
    let mut series: HashMap<String, usize> = HashMap::new();

    for asset in assets {
        let series_id = match (&asset.kind, &asset.series_id) {
            (AssetKind::Episode, Some(id)) => id.clone(),
            _ => {
                listed.push(asset);
                continue;
            }
        };
        match series.get(&series_id) {
            Some(&index) => listed[index].episodes.push(asset),
            None => {
                series.insert(series_id.clone(), listed.len());
                listed.push(series_shell(series_id, asset));
            }
        }
    }

    for asset in listed.iter_mut().filter(|a| a.is_series()) {
        asset.episodes.sort_by_key(Asset::episode_order);
        asset.state = DownloadState::aggregate(asset.episodes.iter().map(|e| &e.state));
        asset.byte_count = asset.total_byte_count();
        asset.downloaded_at = asset.episodes.iter().filter_map(|e| e.downloaded_at).max();
    }

    listed.sort_by(newest_first);
    listed
}

/// Episodes of one series in season/episode order.
pub fn episodes_of(assets: &[Asset], series_id: &str) -> Vec<Asset> {
    let mut episodes: Vec<Asset> = assets
        .iter()
        .filter(|a| a.is_episode() && a.series_id.as_deref() == Some(series_id))
        .cloned()
        .collect();
    episodes.sort_by_key(Asset::episode_order);
    episodes
}

fn series_shell(series_id: String, first: Asset) -> Asset {
    let title = first
        .series_title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| first.title.clone());
    let mut shell = Asset::new(series_id.clone(), AssetKind::Series, title.clone());
    shell.series_id = Some(series_id);
    shell.series_title = Some(title);
    shell.poster_url = first.poster_url.clone();
    shell.poster_path = first.poster_path.clone();
    shell.release_date = first.release_date;
    shell.episodes.push(first);
    shell
}

fn newest_first(a: &Asset, b: &Asset) -> Ordering {
    match (a.downloaded_at, b.downloaded_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.title.cmp(&b.title))
}
