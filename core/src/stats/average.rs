//! Component-wise average of several [`AdvancedStats`].

use std::collections::BTreeMap;

use super::{AdvancedStats, round_half_up};

/// Average `all` field by field.
///
/// Floats are divided by the number of inputs, integer counters are rounded half-up.
/// Team fight aggregates and significant fight counts stay as totals, with net kills
/// recomputed from the summed kills and deaths. Match metadata is taken from the last
/// input. Per-event detail (positions, frames, fights, wards, combos) is not averaged.
pub fn average_advanced_stats(all: &[AdvancedStats]) -> AdvancedStats {
    let mut average = AdvancedStats::default();
    let Some(last) = all.last() else {
        return average;
    };
    average.team_id = last.team_id;
    average.match_id = last.match_id;
    average.platform_id = last.platform_id.clone();
    average.last_updated = last.last_updated;

    for stats in all {
        average.damage_dealt.accumulate(&stats.damage_dealt);
        average.damage_taken.accumulate(&stats.damage_taken);

        average.damage_taken_percent_per_death += stats.damage_taken_percent_per_death;
        average.carry_focus_efficiency += stats.carry_focus_efficiency;
        average.attacks_per_minute += stats.attacks_per_minute;

        add_counts(&mut average.ability_counts, &stats.ability_counts);
        add_counts(
            &mut average.ability_counts_zero_to_ten,
            &stats.ability_counts_zero_to_ten,
        );
        add_percents(&mut average.map_coverages, &stats.map_coverages);
        add_percents(&mut average.useful_percent, &stats.useful_percent);

        for (sum, agg) in [
            (&mut average.favorable_team_fights, &stats.favorable_team_fights),
            (&mut average.balanced_team_fights, &stats.balanced_team_fights),
            (&mut average.unfavorable_team_fights, &stats.unfavorable_team_fights),
        ] {
            sum.count += agg.count;
            sum.kills += agg.kills;
            sum.deaths += agg.deaths;
        }

        average.reveals_per_ward_average += stats.reveals_per_ward_average;
        let live = &mut average.live_wards_average;
        live.yellow += stats.live_wards_average.yellow;
        live.pink += stats.live_wards_average.pink;
        live.blue += stats.live_wards_average.blue;
        live.yellow_and_blue += stats.live_wards_average.yellow_and_blue;

        average.favorable_fight_percent += stats.favorable_fight_percent;
        average.good_kills.accumulate(&stats.good_kills);
        average.bad_deaths.accumulate(&stats.bad_deaths);
        average.combo_damage_per_minute += stats.combo_damage_per_minute;
    }

    let n = all.len() as f64;
    average.damage_dealt.divide(n);
    average.damage_taken.divide(n);

    average.damage_taken_percent_per_death /= n;
    average.carry_focus_efficiency /= n;
    average.attacks_per_minute /= n;
    average.reveals_per_ward_average /= n;
    average.favorable_fight_percent /= n;
    average.combo_damage_per_minute /= n;

    for counts in [
        &mut average.ability_counts,
        &mut average.ability_counts_zero_to_ten,
    ] {
        for count in counts.values_mut() {
            *count = round_half_up(*count as f64 / n);
        }
    }
    for percents in [&mut average.map_coverages, &mut average.useful_percent] {
        for percent in percents.values_mut() {
            *percent /= n;
        }
    }
    let live = &mut average.live_wards_average;
    live.yellow /= n;
    live.pink /= n;
    live.blue /= n;
    live.yellow_and_blue /= n;

    average.favorable_team_fights.recompute_net_kills();
    average.balanced_team_fights.recompute_net_kills();
    average.unfavorable_team_fights.recompute_net_kills();

    average
}

fn add_counts(sum: &mut BTreeMap<String, i64>, other: &BTreeMap<String, i64>) {
    for (key, count) in other {
        *sum.entry(key.clone()).or_default() += count;
    }
}

fn add_percents(sum: &mut BTreeMap<String, f64>, other: &BTreeMap<String, f64>) {
    for (key, percent) in other {
        *sum.entry(key.clone()).or_default() += percent;
    }
}
