//! Single pass over a canonical match for one subject participant.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use lolstats_types::{
    ActorType, Attack, BuildingKill, CanonicalEvent, CanonicalMatch, Damage, Death, EventKind,
    Participant, StateUpdate, team_id,
};

use super::{AdvancedStats, AnalysisOptions, PositionTime, carry_focus_efficiency};
use crate::combos::ComboTracker;
use crate::coverage::CoverageMap;
use crate::error::StatsError;
use crate::handlers::EventHandler;
use crate::lanes::{BuddyFinder, MinionTracker, infer_roles};
use crate::map::is_epic_monster;
use crate::stage::EARLY_GAME_END_SECS;
use crate::team_fights::{FightBalance, TeamFightDetector};
use crate::time_management::{TimeManagement, useful_percent};
use crate::wards::WardTracker;

/// Kill credit goes to the last champion to damage the victim within this window.
pub const KILL_CREDIT_SECS: f64 = 13.0;
/// Minimum spacing of the subject's sampled positions.
pub const POSITION_SAMPLE_SECS: f64 = 3.0;

const ABILITY_SLOTS: [&str; 4] = ["Q", "W", "E", "R"];

/// Compute advanced stats for the participant with `summoner_id`.
///
/// Pure: the same canonical match and subject always give the same result. Fails if
/// the summoner isn't in the roster or a ward dies that was never placed.
pub fn compute_advanced(
    canonical: &CanonicalMatch,
    summoner_id: i64,
    match_id: i64,
    platform_id: &str,
    options: &AnalysisOptions,
) -> Result<AdvancedStats, StatsError> {
    let subject = canonical
        .participants
        .iter()
        .find(|p| p.summoner_id == summoner_id)
        .ok_or(StatsError::UnknownSubject(summoner_id))?;

    let match_duration = canonical.duration();
    let mut pass = StatsPass::new(subject, &canonical.participants, match_duration, options);
    pass.handle_events(&canonical.events)?;

    let mut stats = pass.finish();
    stats.match_id = match_id;
    stats.platform_id = platform_id.to_string();
    Ok(stats)
}

struct StatsPass {
    subject: i64,
    match_duration: f64,
    /// participant → champion id
    champions: HashMap<i64, i64>,
    stats: AdvancedStats,

    attacks_total: i64,
    damage_taken_percent_total: f64,
    deaths: i64,
    /// victim → (seconds, attacker) of the last champion damage it took
    last_champion_damage: HashMap<i64, (f64, i64)>,

    minions: MinionTracker,
    buddies: BuddyFinder,
    coverage: CoverageMap,
    wards: WardTracker,
    fights: TeamFightDetector,
    time: TimeManagement,
    combos: ComboTracker,
}

impl StatsPass {
    fn new(
        subject: &Participant,
        roster: &[Participant],
        match_duration: f64,
        options: &AnalysisOptions,
    ) -> Self {
        let pid = subject.participant_id;
        let zero_counts: BTreeMap<String, i64> =
            ABILITY_SLOTS.iter().map(|s| (s.to_string(), 0)).collect();

        Self {
            subject: pid,
            match_duration,
            champions: roster
                .iter()
                .map(|p| (p.participant_id, p.champion_id))
                .collect(),
            stats: AdvancedStats {
                participant_id: pid,
                summoner_id: subject.summoner_id,
                team_id: team_id(pid),
                ability_counts: zero_counts.clone(),
                ability_counts_zero_to_ten: zero_counts,
                ..Default::default()
            },
            attacks_total: 0,
            damage_taken_percent_total: 0.0,
            deaths: 0,
            last_champion_damage: HashMap::new(),
            minions: MinionTracker::new(),
            buddies: BuddyFinder::new(),
            coverage: CoverageMap::new(options.coverage_grid_size),
            wards: WardTracker::new(match_duration),
            fights: TeamFightDetector::new(pid, match_duration),
            time: TimeManagement::new(pid),
            combos: ComboTracker::new(subject),
        }
    }

    fn on_attack(&mut self, seconds: f64, attack: &Attack) {
        self.minions.add_attack(attack);
        self.fights.add_attack(attack);
        if attack.attacker_id != self.subject {
            return;
        }

        self.attacks_total += 1;
        if ABILITY_SLOTS.contains(&attack.slot.as_str()) {
            *self
                .stats
                .ability_counts
                .entry(attack.slot.clone())
                .or_default() += 1;
            if seconds <= EARLY_GAME_END_SECS {
                *self
                    .stats
                    .ability_counts_zero_to_ten
                    .entry(attack.slot.clone())
                    .or_default() += 1;
            }
        }
        self.combos.add_attack(seconds, attack);
        self.time.add_attack(seconds, attack);
    }

    fn on_damage(&mut self, seconds: f64, damage: &Damage) {
        self.minions.add_damage(damage);

        let Some(&victim_champion) = self.champions.get(&damage.victim_id) else {
            return;
        };
        let attacker_champion = self.champions.get(&damage.attacker_id).copied();

        if let Some(attacker_champion) = attacker_champion {
            self.last_champion_damage
                .insert(damage.victim_id, (seconds, damage.attacker_id));

            if damage.attacker_id != damage.victim_id {
                if damage.attacker_id == self.subject {
                    self.stats.damage_dealt.add_damage(
                        victim_champion,
                        seconds,
                        damage.total,
                        damage.percent,
                    );
                    self.combos.add_damage(seconds, damage);
                }
                if damage.victim_id == self.subject {
                    self.stats.damage_taken.add_damage(
                        attacker_champion,
                        seconds,
                        damage.total,
                        damage.percent,
                    );
                    self.damage_taken_percent_total += damage.percent;
                }
            }
        }

        if damage.victim_id == self.subject {
            self.time.add_damage(seconds, damage);
        }

        // Heavy hits from enemies, turrets and epic monsters can start fights
        let enemy_champion = attacker_champion.is_some()
            && team_id(damage.attacker_id) != team_id(damage.victim_id);
        if enemy_champion
            || damage.attacker_type == Some(ActorType::Turret)
            || is_epic_monster(damage.attacker_id)
        {
            self.fights.add_damage(seconds, damage, self.wards.lives());
        }
    }

    fn on_state_update(&mut self, seconds: f64, update: &StateUpdate) {
        self.fights.add_state_update(seconds, update);
        self.buddies.add_state_update(seconds, update);
        if update.participant_id != self.subject {
            return;
        }

        let due = self
            .stats
            .positions
            .last()
            .is_none_or(|last| seconds - last.seconds > POSITION_SAMPLE_SECS);
        if due && update.health > 0.0 {
            self.stats.positions.push(PositionTime {
                seconds,
                position: update.position,
            });
        }
        self.coverage.add(seconds, &update.position);
        self.time.add_state_update(seconds, update);
    }

    fn on_death(&mut self, seconds: f64, death: &Death) {
        self.fights.add_death(seconds, death, self.wards.lives());

        let killer = self
            .last_champion_damage
            .get(&death.victim_id)
            .filter(|(at, _)| seconds - at < KILL_CREDIT_SECS)
            .map(|&(_, attacker)| attacker);

        if killer == Some(self.subject)
            && let Some(&victim_champion) = self.champions.get(&death.victim_id)
        {
            self.stats.damage_dealt.add_death(victim_champion, seconds);
        }

        if death.victim_id != self.subject {
            return;
        }
        if let Some(&killer_champion) = killer.and_then(|k| self.champions.get(&k)) {
            self.stats.damage_taken.add_death(killer_champion, seconds);
        }
        self.deaths += 1;
        self.time.add_death(seconds);
    }

    fn on_building_kill(&mut self, kill: &BuildingKill) {
        if kill.building_type == ActorType::Turret {
            self.fights.add_turret_kill(kill);
        }
    }

    /// Summaries and cross-tracker metrics once every event has been seen.
    fn finish(self) -> AdvancedStats {
        let Self {
            subject,
            match_duration,
            mut stats,
            attacks_total,
            damage_taken_percent_total,
            deaths,
            minions,
            buddies,
            coverage,
            wards,
            mut fights,
            mut time,
            combos,
            ..
        } = self;

        stats.attacks_per_minute = if match_duration > 0.0 {
            attacks_total as f64 / (match_duration / 60.0)
        } else {
            0.0
        };

        stats.favorable_team_fights = fights.aggregate(FightBalance::Favorable);
        stats.balanced_team_fights = fights.aggregate(FightBalance::Balanced);
        stats.unfavorable_team_fights = fights.aggregate(FightBalance::Unfavorable);
        (stats.good_kills, stats.bad_deaths) = fights.significant_kills_and_deaths();
        let team_fights = fights.into_fights();
        stats.favorable_fight_percent = 100.0 * stats.favorable_team_fights.count as f64
            / (team_fights.len() as f64).max(1.0);

        stats.ward_lives = wards.export_player_wards();
        stats.reveals_per_ward_average = wards.reveals_per_ward_average(subject);
        stats.live_wards_average = wards.live_wards_average(subject);

        let roles = infer_roles(&minions, &buddies).unwrap_or_else(|err| {
            tracing::warn!(
                participant_id = subject,
                assigned = err.assigned,
                "role inference incomplete, using partial roles"
            );
            err.roles
        });
        stats.role_position = roles.get(&subject).copied();
        stats.carry_focus_efficiency = carry_focus_efficiency(&team_fights, &roles);

        stats.damage_taken_percent_per_death =
            damage_taken_percent_total / (deaths as f64).max(1.0);
        stats.map_coverages = coverage.percents();

        time.add_supplemental(&team_fights);
        stats.time_detail = time.all_frames();
        stats.useful_percent = useful_percent(&stats.time_detail, match_duration);

        stats.combos = combos.summaries();
        stats.combo_damage_per_minute = combos.damage_per_minute(match_duration);

        stats.team_fights = team_fights;
        stats
    }
}

impl EventHandler for StatsPass {
    fn handle_event(&mut self, event: &CanonicalEvent) -> Result<(), StatsError> {
        let seconds = event.seconds;
        match &event.kind {
            EventKind::Attack(attack) => {
                self.wards.handle_event(event)?;
                self.on_attack(seconds, attack);
            }
            EventKind::Damage(damage) => self.on_damage(seconds, damage),
            EventKind::StateUpdate(update) => {
                self.wards.handle_event(event)?;
                self.on_state_update(seconds, update);
            }
            EventKind::WardPlaced(placed) => {
                self.wards.handle_event(event)?;
                if placed.participant_id == self.subject {
                    self.time.add_ward(seconds);
                }
            }
            EventKind::WardDeath(_) => self.wards.handle_event(event)?,
            EventKind::Death(death) => self.on_death(seconds, death),
            EventKind::LevelUp(level_up) => {
                self.minions.add_level_up(level_up);
                self.fights.add_level_up(level_up);
            }
            EventKind::BuildingKill(kill) => self.on_building_kill(kill),
        }
        Ok(())
    }
}
