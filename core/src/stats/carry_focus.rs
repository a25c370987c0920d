//! How well a player focused the enemy carries in late fights.

use std::collections::BTreeMap;

use lolstats_types::RolePosition;

use crate::team_fights::TeamFight;

/// Fights starting earlier than this are ignored, whatever the match length.
pub const FIGHTS_FROM_SECS: f64 = 20.0 * 60.0;

/// Average, over late fights against a damaged enemy carry, of the largest share of
/// a carry's damage taken that the player dealt.
///
/// Carries are enemies inferred as mid or adc. Fights where only one enemy was
/// seen are skipped.
pub fn carry_focus_efficiency(
    fights: &[TeamFight],
    roles: &BTreeMap<i64, RolePosition>,
) -> f64 {
    let mut counted = 0.0;
    let mut total = 0.0;
    for fight in fights {
        if fight.begin < FIGHTS_FROM_SECS || fight.enemies_in_vision.len() == 1 {
            continue;
        }

        let best = fight
            .enemy_damage_taken
            .iter()
            .filter(|&(enemy, &taken)| {
                taken != 0.0
                    && matches!(
                        roles.get(enemy),
                        Some(RolePosition::Mid | RolePosition::Adc)
                    )
            })
            .map(|(enemy, &taken)| fight.damage_dealt.get(enemy).copied().unwrap_or(0.0) / taken)
            .reduce(f64::max);

        if let Some(best) = best {
            counted += 1.0;
            total += best.max(0.0);
        }
    }

    total / f64::max(counted, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn late_fight(begin: f64, dealt: &[(i64, f64)], taken: &[(i64, f64)]) -> TeamFight {
        TeamFight {
            begin,
            damage_dealt: dealt.iter().copied().collect(),
            enemy_damage_taken: taken.iter().copied().collect(),
            enemies_in_vision: BTreeMap::from([(6, true), (7, true)]),
            ..Default::default()
        }
    }

    fn roles() -> BTreeMap<i64, RolePosition> {
        BTreeMap::from([
            (6, RolePosition::Top),
            (7, RolePosition::Mid),
            (9, RolePosition::Adc),
        ])
    }

    #[test]
    fn test_best_carry_per_fight_is_averaged() {
        let fights = [
            // 7: 0.25, 9: 0.5 → 0.5
            late_fight(1300.0, &[(7, 10.0), (9, 20.0)], &[(7, 40.0), (9, 40.0)]),
            // Only a top laner hit → not counted
            late_fight(1400.0, &[(6, 50.0)], &[(6, 50.0)]),
            // Carry took damage, but none from us → 0
            late_fight(1500.0, &[], &[(9, 30.0)]),
        ];
        assert_eq!(carry_focus_efficiency(&fights, &roles()), 0.25);
    }

    #[test]
    fn test_early_fights_are_skipped() {
        let fights = [late_fight(1000.0, &[(7, 10.0)], &[(7, 10.0)])];
        assert_eq!(carry_focus_efficiency(&fights, &roles()), 0.0);

        // A 16 minute fight in a short match is still too early
        let fights = [late_fight(960.0, &[(7, 10.0)], &[(7, 20.0)])];
        assert_eq!(carry_focus_efficiency(&fights, &roles()), 0.0);

        let fights = [late_fight(FIGHTS_FROM_SECS, &[(7, 10.0)], &[(7, 20.0)])];
        assert_eq!(carry_focus_efficiency(&fights, &roles()), 0.5);
    }

    #[test]
    fn test_single_enemy_in_vision_is_skipped() {
        let mut fight = late_fight(1300.0, &[(7, 10.0)], &[(7, 10.0)]);
        fight.enemies_in_vision = BTreeMap::from([(7, false)]);
        assert_eq!(carry_focus_efficiency(&[fight], &roles()), 0.0);
    }
}
