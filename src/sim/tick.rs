//! Per-frame simulation step
//!
//! Core game loop that advances the run deterministically from a sequence of
//! inputs and time deltas.

use super::skills::SkillId;
use super::state::{GameEvent, GameState, RunState, scroll_left};

/// Player intents collected since the last step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (Space/ArrowUp/tap)
    pub jump: bool,
    /// Skills to activate, in the order they were pressed
    pub skills: Vec<SkillId>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        !self.jump && self.skills.is_empty()
    }

    pub fn clear(&mut self) {
        self.jump = false;
        self.skills.clear();
    }
}

/// Advance the run by one frame.
///
/// `dt` is elapsed time in seconds and drives every timer (rest stop, skill
/// expiry, cooldowns). Movement constants are per frame. Does nothing unless
/// the run is `Running`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.run_state != RunState::Running {
        return;
    }
    let dt = dt.max(0.0);

    // Expiries are applied before anything reads skill flags
    for id in state.skills.expire_all(state.clock) {
        log::debug!("Skill {} expired at t={:.2}", id.as_str(), state.clock);
        state.events.push(GameEvent::SkillExpired(id));
    }

    if input.jump {
        state.jump();
    }
    for &id in &input.skills {
        state.activate_skill(id);
    }

    // Rest stop
    state.clock += dt as f64;
    state.rest_timer += dt;
    if state.rest_timer >= state.tuning.rest_interval {
        state.open_shop();
        return;
    }

    let speed = state.effective_speed();
    state.economy.advance(speed);

    state.player.step(&state.tuning);

    // Spawning
    if state.frame % state.spawn_interval(speed) == 0 {
        state.spawn_obstacle();
    }
    if state.rng_roll(state.tuning.coin_spawn_chance) {
        state.spawn_coin();
    }

    // Scroll and cull
    for obstacle in &mut state.obstacles {
        obstacle.offscreen = scroll_left(&mut obstacle.rect, speed);
    }
    for coin in &mut state.coins {
        coin.offscreen = scroll_left(&mut coin.rect, speed);
    }
    state.obstacles.retain(|o| !o.offscreen);
    state.coins.retain(|c| !c.offscreen);

    // Obstacle hits end the run unless invincible
    let player_rect = state.player.rect();
    if !state.skills.is_active(SkillId::Invincible)
        && state.obstacles.iter().any(|o| o.rect.overlaps(&player_rect))
    {
        state.crash();
        return;
    }

    // Coin pickups
    let before = state.coins.len();
    state.coins.retain(|c| !c.rect.overlaps(&player_rect));
    let collected = (before - state.coins.len()) as u64;
    if collected > 0 {
        let amount = collected.saturating_mul(state.tuning.coin_value);
        state.economy.earn(amount);
        for _ in 0..collected {
            state.events.push(GameEvent::CoinCollected {
                amount: state.tuning.coin_value,
            });
        }
        log::trace!("Collected {} coin(s), balance {}", collected, state.economy.currency);
    }

    state.skills.cool_down_all(dt);
    state.frame += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::economy::UpgradeKind;
    use crate::sim::state::ObstacleKind;
    use glam::Vec2;

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    fn skill(id: SkillId) -> TickInput {
        TickInput {
            skills: vec![id],
            ..Default::default()
        }
    }

    #[test]
    fn test_first_frame_spawns_obstacle_and_scores() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.frame, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].rect.left(), CANVAS_WIDTH - 6.0);
        assert_eq!(state.economy.distance, 6.0);
        assert_eq!(state.economy.score, 0);
    }

    #[test]
    fn test_obstacle_spawn_cadence() {
        let mut state = GameState::new(3);
        // Keep the player safe so the run keeps going
        state.skills.get_mut(SkillId::Invincible).active_until = Some(f64::MAX);
        let mut spawned = Vec::new();
        let mut last_id = 0;
        for frame in 0..400u64 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            let newest = state.obstacles.iter().map(|o| o.id).max().unwrap_or(0);
            if newest > last_id
                && state
                    .obstacles
                    .iter()
                    .any(|o| o.id == newest && o.rect.left() == CANVAS_WIDTH - 6.0)
            {
                spawned.push(frame);
            }
            last_id = last_id.max(newest);
        }
        assert_eq!(spawned, vec![0, 166, 332]);
    }

    #[test]
    fn test_crash_ends_run_and_freezes() {
        let mut state = GameState::new(1);
        let player = state.player.rect();
        let pos = player.pos + Vec2::new(20.0, 20.0);
        state.insert_obstacle(ObstacleKind::Ground, pos, Vec2::new(30.0, 50.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run_state, RunState::GameOver);
        assert!(state.events.contains(&GameEvent::Crashed));

        let frozen_positions: Vec<f32> = state.obstacles.iter().map(|o| o.rect.left()).collect();
        let frozen_distance = state.economy.distance;
        for _ in 0..30 {
            tick(&mut state, &jump(), SIM_DT);
        }
        let positions: Vec<f32> = state.obstacles.iter().map(|o| o.rect.left()).collect();
        assert_eq!(positions, frozen_positions);
        assert_eq!(state.economy.distance, frozen_distance);
        assert!(state.player.is_grounded());
    }

    #[test]
    fn test_invincible_passes_through() {
        let mut state = GameState::new(1);
        tick(&mut state, &skill(SkillId::Invincible), SIM_DT);
        let player = state.player.rect();
        state.insert_obstacle(ObstacleKind::Ground, player.pos, Vec2::new(30.0, 50.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run_state, RunState::Running);
    }

    #[test]
    fn test_invincibility_wears_off() {
        let mut state = GameState::new(1);
        tick(&mut state, &skill(SkillId::Invincible), 1.0);
        assert!(state.skills.is_active(SkillId::Invincible));
        // Four more seconds: still active at t=4
        for _ in 0..4 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert!(state.skills.is_active(SkillId::Invincible));
        // Expires at the start of the step whose clock reaches t=5
        tick(&mut state, &TickInput::default(), 1.0);
        assert!(!state.skills.is_active(SkillId::Invincible));
        assert!(state.events.contains(&GameEvent::SkillExpired(SkillId::Invincible)));
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = GameState::new(1);
        let player = state.player.rect();
        // Two coins both inside the player after scrolling
        state.insert_coin(player.pos + Vec2::new(20.0, 10.0));
        state.insert_coin(player.pos + Vec2::new(30.0, 30.0));
        state.drain_events();

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.economy.currency, 20);
        let pickups = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count();
        assert_eq!(pickups, 2);
        assert!(state.coins.iter().all(|c| !c.rect.overlaps(&state.player.rect())));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.economy.currency, 20);
    }

    #[test]
    fn test_huge_coin_value_saturates() {
        let mut state = GameState::with_tuning(
            1,
            crate::Tuning {
                coin_value: u64::MAX,
                ..Default::default()
            },
        );
        let player = state.player.rect();
        state.insert_coin(player.pos + Vec2::new(20.0, 10.0));
        state.insert_coin(player.pos + Vec2::new(30.0, 30.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.economy.currency, u64::MAX);
        assert_eq!(state.run_state, RunState::Running);
    }

    #[test]
    fn test_offscreen_entities_removed_without_skipping() {
        let mut state = GameState::new(1);
        state.skills.get_mut(SkillId::Invincible).active_until = Some(f64::MAX);
        // Three adjacent coins about to leave, one staying
        for x in [-24.0, -23.0, -22.0] {
            state.insert_coin(Vec2::new(x, 10.0));
        }
        let stays = state.insert_coin(Vec2::new(10.0, 10.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        let ids: Vec<u32> = state.coins.iter().map(|c| c.id).filter(|&id| id <= stays).collect();
        assert_eq!(ids, vec![stays]);
    }

    #[test]
    fn test_rest_stop_pauses_until_closed() {
        let mut state = GameState::new(9);
        state.skills.get_mut(SkillId::Invincible).active_until = Some(f64::MAX);

        let mut steps = 0;
        while state.run_state == RunState::Running {
            tick(&mut state, &TickInput::default(), 0.5);
            steps += 1;
            assert!(steps <= 360);
        }
        assert_eq!(state.run_state, RunState::Shop);
        assert_eq!(steps, 360);
        assert!(state.events.contains(&GameEvent::ShopOpened));

        let score = state.economy.score;
        let distance = state.economy.distance;
        let frame = state.frame;
        for _ in 0..100 {
            tick(&mut state, &jump(), 0.5);
        }
        assert_eq!(state.economy.score, score);
        assert_eq!(state.economy.distance, distance);
        assert_eq!(state.frame, frame);

        state.close_shop();
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.rest_timer, 0.0);
        tick(&mut state, &TickInput::default(), 0.5);
        assert!(state.economy.distance > distance);
    }

    #[test]
    fn test_shop_upgrade_speeds_up_run() {
        let mut state = GameState::new(2);
        state.run_state = RunState::Shop;
        state.economy.currency = 100;
        assert!(state.purchase(UpgradeKind::Speed).is_bought());
        state.close_shop();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.economy.distance, 6.5);
    }

    #[test]
    fn test_cooldown_ticks_down_and_rearms() {
        let mut state = GameState::new(4);
        state.skills.get_mut(SkillId::Invincible).active_until = Some(f64::MAX);
        tick(&mut state, &skill(SkillId::TimeSlow), 1.0);
        assert_eq!(state.skills.get(SkillId::TimeSlow).remaining_cooldown, 59.0);

        // Pressing again while cooling down changes nothing
        let before = state.skills.get(SkillId::TimeSlow).active_until;
        tick(&mut state, &skill(SkillId::TimeSlow), 1.0);
        assert_eq!(state.skills.get(SkillId::TimeSlow).active_until, before);

        for _ in 0..58 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert!(state.skills.get(SkillId::TimeSlow).is_ready());
        tick(&mut state, &skill(SkillId::TimeSlow), 1.0);
        assert!(state.skills.is_active(SkillId::TimeSlow));
        assert!(!state.skills.get(SkillId::TimeSlow).is_ready());
    }

    #[test]
    fn test_time_slow_halves_scroll() {
        let mut state = GameState::new(5);
        tick(&mut state, &skill(SkillId::TimeSlow), SIM_DT);
        assert_eq!(state.economy.distance, 3.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput::default(),
            jump(),
            skill(SkillId::TimeSlow),
            TickInput::default(),
        ];

        for _ in 0..150 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.run_state, state2.run_state);
        assert_eq!(state1.economy.score, state2.economy.score);
        assert_eq!(state1.coins.len(), state2.coins.len());
        let ids1: Vec<u32> = state1.obstacles.iter().map(|o| o.id).collect();
        let ids2: Vec<u32> = state2.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids1, ids2);
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut state = GameState::new(6);
        tick(&mut state, &TickInput::default(), -5.0);
        assert_eq!(state.clock, 0.0);
        assert_eq!(state.rest_timer, 0.0);
    }
}
