//! Table state
//!
//! The table owns every ball and cushion. Balls live in a vector indexed by
//! their id, which never changes: pocketed balls are taken out of play, not
//! removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::min_separation;
use super::cushion::TableGeometry;
use super::rack::{RACK_SIZE, rack};
use crate::consts::*;
use crate::settings::Settings;

/// Complete table state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    pub settings: Settings,
    pub geometry: TableGeometry,
    /// Balls sorted by id; index == id
    pub balls: Vec<Ball>,
    /// Apex of the rack
    pub rack_anchor: Vec2,
    /// Where the cue ball is spotted on a re-rack
    pub cue_spot: Vec2,
    /// Seed of the current rack
    pub seed: u64,
    /// Frames stepped since the last rack
    pub frames: u64,
}

impl TableState {
    /// Rack a table: cue ball is id 0, the 15 racked balls follow in slot order
    pub fn new(
        settings: Settings,
        geometry: TableGeometry,
        rack_anchor: Vec2,
        cue_spot: Vec2,
        seed: u64,
    ) -> Self {
        settings.validate();
        let mut state = Self {
            settings,
            geometry,
            balls: Vec::with_capacity(RACK_SIZE + 1),
            rack_anchor,
            cue_spot,
            seed,
            frames: 0,
        };
        state.rerack(seed);
        state
    }

    /// Standard table with the rack on the upper half and the cue ball below
    pub fn standard(settings: Settings, seed: u64) -> Self {
        let geometry =
            TableGeometry::standard(TABLE_WIDTH, TABLE_HEIGHT, POCKET_MOUTH, settings.ball_radius);
        let rack_anchor = Vec2::new(0.0, -TABLE_HEIGHT / 4.0);
        let cue_spot = Vec2::new(0.0, TABLE_HEIGHT / 4.0);
        Self::new(settings, geometry, rack_anchor, cue_spot, seed)
    }

    /// Throw away all balls and rack again
    pub fn rerack(&mut self, seed: u64) {
        self.seed = seed;
        self.frames = 0;
        self.balls.clear();
        self.balls.push(Ball::new(0, 0, self.cue_spot, &self.settings));
        for slot in rack(self.rack_anchor, self.settings.rack_ball_size(), seed) {
            let id = self.balls.len() as u32;
            self.balls.push(Ball::new(id, slot.number, slot.position, &self.settings));
        }
        log::info!(
            "Table racked: {} balls, {} cushions",
            self.balls.len(),
            self.geometry.len()
        );
    }

    /// Ball by number (0 = cue)
    pub fn ball(&self, number: u8) -> Option<&Ball> {
        self.balls.iter().find(|b| b.number == number)
    }

    pub fn ball_mut(&mut self, number: u8) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.number == number)
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.balls.iter().find(|b| b.is_cue())
    }

    /// True when no ball in play is moving
    pub fn all_stopped(&self) -> bool {
        self.balls.iter().filter(|b| b.in_play).all(|b| !b.is_moving)
    }

    /// Strike the cue ball toward `target`
    ///
    /// Refused (returns false) while any ball is still moving or the cue ball
    /// is out of play.
    pub fn strike_cue(&mut self, target: Vec2) -> bool {
        if !self.all_stopped() {
            log::debug!("strike refused: balls still moving");
            return false;
        }
        let power = self.settings.strike_power;
        match self.balls.iter_mut().find(|b| b.is_cue()) {
            Some(cue) if cue.in_play => {
                cue.strike(target, power);
                true
            }
            _ => {
                log::debug!("strike refused: cue ball not in play");
                false
            }
        }
    }

    /// Take a ball off the table (host detected a pocket)
    pub fn remove_from_play(&mut self, number: u8) -> bool {
        match self.ball_mut(number) {
            Some(ball) => {
                ball.in_play = false;
                ball.halt();
                log::debug!("ball {} out of play", number);
                true
            }
            None => false,
        }
    }

    /// Return a ball to play at `position`, at rest
    pub fn respot(&mut self, number: u8, position: Vec2) -> bool {
        match self.ball_mut(number) {
            Some(ball) => {
                ball.in_play = true;
                ball.position = position;
                ball.halt();
                true
            }
            None => false,
        }
    }

    /// (number, position) of every ball in play, in id order
    pub fn positions(&self) -> Vec<(u8, Vec2)> {
        self.balls
            .iter()
            .filter(|b| b.in_play)
            .map(|b| (b.number, b.position))
            .collect()
    }

    pub fn min_separation(&self) -> Option<f32> {
        min_separation(&self.balls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rack::CENTER_SLOT;

    #[test]
    fn test_standard_table_layout() {
        let state = TableState::standard(Settings::default(), 42);
        assert_eq!(state.balls.len(), 16);
        assert_eq!(state.geometry.len(), 18);

        for (index, ball) in state.balls.iter().enumerate() {
            assert_eq!(ball.id as usize, index);
            assert!(!ball.is_moving);
            assert!(state.geometry.contains(ball.position));
        }

        let cue = state.cue_ball().unwrap();
        assert_eq!(cue.id, 0);
        assert_eq!(cue.position, state.cue_spot);

        // Slot 4 of the rack is ball id 5
        assert_eq!(state.balls[CENTER_SLOT + 1].number, 8);

        let mut numbers: Vec<u8> = state.balls.iter().map(|b| b.number).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (0..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_fresh_rack_has_no_overlaps() {
        let state = TableState::standard(Settings::default(), 3);
        let min = state.min_separation().unwrap();
        assert!(min >= 2.0 * state.settings.ball_radius);
    }

    #[test]
    fn test_rerack_is_deterministic() {
        let mut state = TableState::standard(Settings::default(), 11);
        let before = state.positions();
        state.balls[3].position = Vec2::new(1.0, 2.0);
        state.rerack(11);
        assert_eq!(state.positions(), before);
    }

    #[test]
    fn test_strike_requires_rest() {
        let mut state = TableState::standard(Settings::default(), 1);
        let target = state.rack_anchor;
        assert!(state.strike_cue(target));
        assert!(!state.all_stopped());
        assert!(!state.strike_cue(target));

        let cue = state.cue_ball().unwrap();
        let expected = (target - state.cue_spot) * state.settings.strike_power;
        assert_eq!(cue.velocity, expected);
    }

    #[test]
    fn test_remove_and_respot() {
        let mut state = TableState::standard(Settings::default(), 1);
        assert!(state.remove_from_play(0));
        assert!(!state.strike_cue(Vec2::ZERO));
        assert_eq!(state.positions().len(), 15);

        assert!(state.respot(0, Vec2::new(0.0, 300.0)));
        assert_eq!(state.cue_ball().unwrap().position, Vec2::new(0.0, 300.0));
        assert!(state.strike_cue(Vec2::ZERO));

        assert!(!state.remove_from_play(99));
    }

    #[test]
    fn test_serializes_to_json() {
        let state = TableState::standard(Settings::default(), 5);
        let json = serde_json::to_string(&state).unwrap();
        let restored: TableState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.positions(), state.positions());
        assert_eq!(restored.geometry.len(), 18);
    }
}
