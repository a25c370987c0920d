//! Subcommand bodies. Each reads its inputs, runs the pure core and returns values
//! for `main` to print.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use lolstats_core::{
    AdvancedStats, AnalysisOptions, MatchInput, average_advanced_stats, compute_advanced,
    normalize,
};
use lolstats_types::formatting::{format_compact, format_pct};
use lolstats_types::{CanonicalMatch, WorkerConfig};
use rayon::prelude::*;
use serde::Deserialize;

pub fn read_match(path: &Path) -> Result<MatchInput> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing match {}", path.display()))
}

pub fn normalize_file(path: &Path) -> Result<CanonicalMatch> {
    let input = read_match(path)?;
    normalize(&input).with_context(|| format!("normalizing {}", path.display()))
}

/// Stats for one match file: the given summoner, or every participant.
pub fn stats_for_match(
    input: &MatchInput,
    summoner: Option<i64>,
    config: &WorkerConfig,
) -> Result<Vec<AdvancedStats>> {
    let canonical = normalize(input)?;
    let options = AnalysisOptions::from(config);
    let subjects: Vec<i64> = match summoner {
        Some(id) => vec![id],
        None => input.participants.iter().map(|p| p.summoner_id).collect(),
    };

    subjects
        .into_iter()
        .map(|summoner_id| -> Result<AdvancedStats> {
            let mut stats = compute_advanced(
                &canonical,
                summoner_id,
                input.match_id,
                &input.platform_id,
                &options,
            )?;
            tracing::debug!(
                match_id = input.match_id,
                summoner_id,
                role = ?stats.role_position,
                useful = %format_pct(stats.useful_percent.get("all").copied().unwrap_or(0.0)),
                combo_damage_per_minute = %format_compact(stats.combo_damage_per_minute),
                "computed advanced stats"
            );
            stats.last_updated = Some(Utc::now());
            if config.trim_non_stats {
                stats.trim_non_stats();
            }
            Ok(stats)
        })
        .collect()
}

/// Stats for many match files in parallel.
///
/// A file that fails is logged and skipped; it's only an error when nothing worked.
pub fn stats_files(
    paths: &[PathBuf],
    summoner: Option<i64>,
    config: &WorkerConfig,
) -> Result<Vec<AdvancedStats>> {
    let results: Vec<(&PathBuf, Result<Vec<AdvancedStats>>)> = paths
        .par_iter()
        .map(|path| {
            let stats = read_match(path).and_then(|input| {
                stats_for_match(&input, summoner, config)
                    .with_context(|| format!("computing stats for {}", path.display()))
            });
            (path, stats)
        })
        .collect();

    let mut all = Vec::new();
    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(stats) => {
                tracing::info!(path = %path.display(), results = stats.len(), "computed stats");
                all.extend(stats);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(path = %path.display(), error = ?e, "skipping match");
            }
        }
    }

    if failed > 0 && failed == paths.len() {
        bail!("all {failed} match files failed");
    }
    Ok(all)
}

/// A stats file holds either one result or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatsFile {
    Many(Vec<AdvancedStats>),
    One(Box<AdvancedStats>),
}

pub fn average_files(paths: &[PathBuf]) -> Result<AdvancedStats> {
    let mut all = Vec::new();
    for path in paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        match serde_json::from_str(&text)
            .with_context(|| format!("parsing stats {}", path.display()))?
        {
            StatsFile::Many(stats) => all.extend(stats),
            StatsFile::One(stats) => all.push(*stats),
        }
    }
    tracing::info!(count = all.len(), "averaging stats");
    Ok(average_advanced_stats(&all))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lolstats_types::Participant;
    use std::io::Write;

    fn roster_only(summoners: &[i64]) -> MatchInput {
        MatchInput {
            match_id: 7,
            platform_id: "EUW1".to_string(),
            participants: summoners
                .iter()
                .enumerate()
                .map(|(i, &summoner_id)| Participant {
                    participant_id: i as i64 + 1,
                    summoner_id,
                    ..Default::default()
                })
                .collect(),
            events: Vec::new(),
        }
    }

    #[test]
    fn test_every_participant_without_summoner() {
        let input = roster_only(&[11, 12, 13]);
        let stats = stats_for_match(&input, None, &WorkerConfig::default()).unwrap();

        let summoners: Vec<i64> = stats.iter().map(|s| s.summoner_id).collect();
        assert_eq!(summoners, vec![11, 12, 13]);
        assert!(stats.iter().all(|s| s.last_updated.is_some()));
        assert!(stats.iter().all(|s| s.match_id == 7 && s.platform_id == "EUW1"));
    }

    #[test]
    fn test_unknown_summoner_fails() {
        let input = roster_only(&[11, 12]);
        assert!(stats_for_match(&input, Some(99), &WorkerConfig::default()).is_err());
    }

    #[test]
    fn test_one_bad_file_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(&good, serde_json::to_string(&roster_only(&[11])).unwrap()).unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();

        let stats = stats_files(&[good, bad.clone()], None, &WorkerConfig::default()).unwrap();
        assert_eq!(stats.len(), 1);
        assert!(stats_files(&[bad], None, &WorkerConfig::default()).is_err());
    }

    #[test]
    fn test_average_reads_lists_and_single_results() {
        let mut list = tempfile::NamedTempFile::new().unwrap();
        let first = AdvancedStats {
            attacks_per_minute: 10.0,
            ..Default::default()
        };
        write!(list, "{}", serde_json::to_string(&vec![first]).unwrap()).unwrap();

        let mut single = tempfile::NamedTempFile::new().unwrap();
        let second = AdvancedStats {
            attacks_per_minute: 20.0,
            match_id: 3,
            ..Default::default()
        };
        write!(single, "{}", serde_json::to_string(&second).unwrap()).unwrap();

        let average =
            average_files(&[list.path().to_path_buf(), single.path().to_path_buf()]).unwrap();
        assert_eq!(average.attacks_per_minute, 15.0);
        assert_eq!(average.match_id, 3);
    }
}
