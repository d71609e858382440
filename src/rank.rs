use std::cmp::Reverse;

use crate::core::{MediaItem, MediaKind, Variant};
use crate::quality::{QualityTier, UNKNOWN_RESOLUTION};

/// Normalize one item's renditions.
///
/// Variants end up sorted by descending pixel area (stable, so equal areas
/// keep their source order) and the item's locators and quality summary are
/// taken from the first one. Running this twice changes nothing.
pub fn rank_media(item: &mut MediaItem) {
    if item.variants.is_empty() {
        item.variants.push(synthesize_variant(item));
    }

    item.variants.sort_by_key(|v| Reverse(v.pixel_area()));

    let best = &item.variants[0];
    item.url = best.url.clone();
    item.download_url = best.url.clone();
    item.best_quality = best.quality;

    item.available_qualities = item
        .variants
        .iter()
        .map(|v| v.quality)
        .filter(|q| !q.is_unknown())
        .collect();
    item.available_resolutions = item
        .variants
        .iter()
        .map(|v| v.resolution.clone())
        .filter(|r| r != UNKNOWN_RESOLUTION)
        .collect();
}

pub fn rank_all(mut media: Vec<MediaItem>) -> Vec<MediaItem> {
    media.iter_mut().for_each(rank_media);
    media
}

fn synthesize_variant(item: &MediaItem) -> Variant {
    let resolution = item.resolution_label();
    let quality = QualityTier::from_label(&resolution);
    let content_type = match item.kind {
        MediaKind::Photo => "image/jpeg",
        MediaKind::Video | MediaKind::Gif => "video/mp4",
    };
    Variant {
        url: item.url.clone(),
        resolution,
        quality,
        bitrate: None,
        content_type: content_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with(resolutions: &[&str]) -> MediaItem {
        let variants = resolutions
            .iter()
            .enumerate()
            .map(|(i, r)| Variant::video(format!("https://v/{i}.mp4"), r.to_string()))
            .collect();
        MediaItem::new(MediaKind::Video, "https://v/placeholder.mp4".into()).with_variants(variants)
    }

    fn resolutions(item: &MediaItem) -> Vec<&str> {
        item.variants.iter().map(|v| v.resolution.as_str()).collect()
    }

    #[test]
    fn test_sorts_by_descending_area() {
        let mut item = item_with(&["640x360", "1920x1080", "854x480"]);
        rank_media(&mut item);
        assert_eq!(resolutions(&item), vec!["1920x1080", "854x480", "640x360"]);
        assert_eq!(item.url, "https://v/1.mp4");
        assert_eq!(item.download_url, item.variants[0].url);
        assert_eq!(item.best_quality, QualityTier::P1080);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let mut item = item_with(&["unknown", "1280x720", "garbage", "1280x720"]);
        rank_media(&mut item);
        let urls: Vec<&str> = item.variants.iter().map(|v| v.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://v/1.mp4", "https://v/3.mp4", "https://v/0.mp4", "https://v/2.mp4"]
        );
    }

    #[test]
    fn test_available_sets_are_unique_and_skip_unknown() {
        let mut item = item_with(&["1280x720", "unknown", "1280x720", "640x360"]);
        rank_media(&mut item);
        let qualities: Vec<String> = item
            .available_qualities
            .iter()
            .map(|q| q.to_string())
            .collect();
        assert_eq!(qualities, vec!["720p", "360p"]);
        let res: Vec<&String> = item.available_resolutions.iter().collect();
        assert_eq!(res, vec!["1280x720", "640x360"]);
    }

    #[test]
    fn test_idempotent() {
        let mut once = item_with(&["640x360", "unknown", "1920x1080", "854x480", "1920x1080"]);
        rank_media(&mut once);
        let mut twice = once.clone();
        rank_media(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(
            once.available_qualities.iter().collect::<Vec<_>>(),
            twice.available_qualities.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_empty_variants_synthesized_from_item() {
        let mut item = MediaItem::new(MediaKind::Video, "https://v/only.mp4".into())
            .with_dimensions(1280, 720);
        rank_media(&mut item);
        assert_eq!(item.variants.len(), 1);
        assert_eq!(item.variants[0].resolution, "1280x720");
        assert_eq!(item.best_quality, QualityTier::P720);

        let mut item =
            MediaItem::new(MediaKind::Gif, "https://v/gif.mp4".into()).with_size("480x270".into());
        rank_media(&mut item);
        assert_eq!(item.best_quality, QualityTier::P480);

        let mut item = MediaItem::new(MediaKind::Photo, "https://p/a.jpg".into());
        rank_media(&mut item);
        assert_eq!(item.variants[0].resolution, "unknown");
        assert_eq!(item.variants[0].content_type, "image/jpeg");
        assert!(item.available_qualities.is_empty());
        assert!(item.available_resolutions.is_empty());
    }
}
