use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{Author, MediaItem};
use crate::quality::{QualityTier, Resolution, UNKNOWN_RESOLUTION};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedFilenames {
    /// `{handle}_{id}`
    pub simple: String,
    /// `{name}_{handle}_{id}`
    pub detailed: String,
    /// `{handle}_{id}_{YYYYMMDD_HHMMSS}`
    pub timestamped: String,
}

/// Read-only digest of everything downloadable in a result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadSummary {
    pub total_variants: usize,
    pub highest_quality: QualityTier,
    pub sorted_qualities: Vec<QualityTier>,
    pub sorted_resolutions: Vec<String>,
    pub suggested_filenames: SuggestedFilenames,
}

impl DownloadSummary {
    pub fn build(
        id: &str,
        author: &Author,
        created_at: DateTime<Utc>,
        media: &[MediaItem],
    ) -> Self {
        let total_variants = media.iter().map(|m| m.variants.len()).sum();

        let qualities: IndexSet<QualityTier> = media
            .iter()
            .flat_map(|m| m.available_qualities.iter().copied())
            .filter(|q| !q.is_unknown())
            .collect();
        let mut sorted_qualities: Vec<QualityTier> = qualities.into_iter().collect();
        sorted_qualities.sort_by_key(|q| std::cmp::Reverse(q.rank()));

        let resolutions: IndexSet<String> = media
            .iter()
            .flat_map(|m| m.available_resolutions.iter().cloned())
            .filter(|r| r != UNKNOWN_RESOLUTION)
            .collect();
        let mut sorted_resolutions: Vec<String> = resolutions.into_iter().collect();
        sorted_resolutions.sort_by_key(|r| std::cmp::Reverse(Resolution::parse(r).area()));

        let highest_quality = sorted_qualities
            .first()
            .copied()
            .unwrap_or(QualityTier::Unknown);

        Self {
            total_variants,
            highest_quality,
            sorted_qualities,
            sorted_resolutions,
            suggested_filenames: suggested_filenames(id, author, created_at),
        }
    }
}

fn clean(s: &str) -> String {
    let sanitized = sanitize_filename::sanitize(s);
    let joined = sanitized.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        "unknown".to_string()
    } else {
        joined
    }
}

fn suggested_filenames(id: &str, author: &Author, created_at: DateTime<Utc>) -> SuggestedFilenames {
    let id = clean(id);
    let name = clean(&author.name);
    let handle = clean(&author.username);
    let stamp = created_at.format("%Y%m%d_%H%M%S");
    SuggestedFilenames {
        simple: format!("{handle}_{id}"),
        detailed: format!("{name}_{handle}_{id}"),
        timestamped: format!("{handle}_{id}_{stamp}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MediaKind, Variant};
    use chrono::TimeZone;

    fn video(resolutions: &[&str]) -> MediaItem {
        let variants: Vec<Variant> = resolutions
            .iter()
            .map(|r| Variant::video(format!("https://v/{r}.mp4"), r.to_string()))
            .collect();
        let mut item = MediaItem::new(MediaKind::Video, String::new()).with_variants(variants);
        for v in &item.variants {
            if !v.quality.is_unknown() {
                item.available_qualities.insert(v.quality);
            }
            if v.resolution != UNKNOWN_RESOLUTION {
                item.available_resolutions.insert(v.resolution.clone());
            }
        }
        item
    }

    fn author() -> Author {
        Author::new("Jane Doe".into(), "jane/doe".into(), String::new())
    }

    #[test]
    fn test_qualities_sorted_by_tier_rank() {
        let media = vec![video(&["640x360", "1280x720"]), video(&["3840x2160", "854x480"])];
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let summary = DownloadSummary::build("1234567890123", &author(), ts, &media);

        assert_eq!(summary.total_variants, 4);
        assert_eq!(
            summary.sorted_qualities,
            vec![
                QualityTier::Uhd,
                QualityTier::P720,
                QualityTier::P480,
                QualityTier::P360
            ]
        );
        assert_eq!(summary.highest_quality, summary.sorted_qualities[0]);
        assert_eq!(
            summary.sorted_resolutions,
            vec!["3840x2160", "1280x720", "854x480", "640x360"]
        );
    }

    #[test]
    fn test_duplicates_across_items_collapse() {
        let media = vec![video(&["1280x720"]), video(&["1280x720", "unknown"])];
        let summary = DownloadSummary::build("1", &author(), Utc::now(), &media);
        assert_eq!(summary.sorted_qualities, vec![QualityTier::P720]);
        assert_eq!(summary.sorted_resolutions, vec!["1280x720"]);
        assert_eq!(summary.total_variants, 3);
    }

    #[test]
    fn test_empty_media() {
        let summary = DownloadSummary::build("1", &author(), Utc::now(), &[]);
        assert_eq!(summary.highest_quality, QualityTier::Unknown);
        assert!(summary.sorted_qualities.is_empty());
    }

    #[test]
    fn test_filenames_are_sanitized() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let names = suggested_filenames("1234567890123", &author(), ts);
        assert_eq!(names.simple, "janedoe_1234567890123");
        assert_eq!(names.detailed, "Jane_Doe_janedoe_1234567890123");
        assert_eq!(names.timestamped, "janedoe_1234567890123_20240301_123005");
    }
}
