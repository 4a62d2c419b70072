//! Opening rack
//!
//! Fifteen numbered balls in a five-row triangle (1, 2, 3, 4, 5 per row).
//! Row 0 is the apex at the anchor; later rows extend toward -y, away from a
//! cue ball placed below the rack.
//!
//! ```text
//!     S T S T T    <- row 4
//!      T S T S     <- row 3
//!       S 8 T      <- row 2
//!        T S       <- row 1
//!         S        <- row 0 (apex, on the anchor)
//! ```
//!
//! Solids and stripes are shuffled independently and dealt into the pattern.
//! The 8-ball always sits in the centre slot.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Rows in the triangle
pub const RACK_ROWS: usize = 5;
/// Balls in a full rack
pub const RACK_SIZE: usize = RACK_ROWS * (RACK_ROWS + 1) / 2;
/// Slot index of the 8-ball (row 2, middle)
pub const CENTER_SLOT: usize = 4;

const EIGHT: u8 = 8;

/// What a rack slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    Solid,
    Stripe,
    Eight,
}

/// Slot pattern, row by row from the apex
pub const SLOT_PATTERN: [SlotKind; RACK_SIZE] = {
    use SlotKind::*;
    [
        Solid,
        Stripe, Solid,
        Solid, Eight, Stripe,
        Stripe, Solid, Stripe, Solid,
        Solid, Stripe, Stripe, Solid, Stripe,
    ]
};

/// A ball placed in the rack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RackSlot {
    pub number: u8,
    pub row: usize,
    pub position: Vec2,
}

/// (row, column) of a slot index
pub fn slot_row_col(slot: usize) -> (usize, usize) {
    let mut row = 0;
    let mut first = 0;
    while slot > first + row {
        first += row + 1;
        row += 1;
    }
    (row, slot - first)
}

/// Centres of the 15 slots
///
/// `ball_size` is the slot half-width: neighbours in a row are two
/// `ball_size` apart and rows are `sin(2π/3) * 2 * ball_size` apart, which
/// packs the balls hexagonally. Each row is indented by half its missing
/// width so the triangle stays centred on `anchor.x`.
pub fn slot_positions(anchor: Vec2, ball_size: f32) -> [Vec2; RACK_SIZE] {
    let x_spacing = ball_size;
    let y_spacing = -(2.0 * std::f32::consts::PI / 3.0).sin() * ball_size * 2.0;

    let mut positions = [Vec2::ZERO; RACK_SIZE];
    for (slot, position) in positions.iter_mut().enumerate() {
        let (row, col) = slot_row_col(slot);
        let x = anchor.x + (2 * col) as f32 * x_spacing - row as f32 * x_spacing;
        let y = anchor.y + row as f32 * y_spacing;
        *position = Vec2::new(x, y);
    }
    positions
}

/// Deal shuffled solids and stripes into the slot pattern
pub fn shuffled_numbers<R: Rng + ?Sized>(rng: &mut R) -> [u8; RACK_SIZE] {
    let mut solids: Vec<u8> = (1..=7).collect();
    let mut stripes: Vec<u8> = (9..=15).collect();
    solids.shuffle(rng);
    stripes.shuffle(rng);

    let mut solids = solids.into_iter();
    let mut stripes = stripes.into_iter();
    let mut numbers = [0u8; RACK_SIZE];
    for (number, kind) in numbers.iter_mut().zip(SLOT_PATTERN) {
        *number = match kind {
            SlotKind::Solid => solids.next().unwrap_or(0),
            SlotKind::Stripe => stripes.next().unwrap_or(0),
            SlotKind::Eight => EIGHT,
        };
    }
    place_eight_center(&mut numbers);
    numbers
}

/// Move the 8-ball into the centre slot, swapping out whatever was there
///
/// Returns false if `numbers` has no 8-ball.
pub fn place_eight_center(numbers: &mut [u8; RACK_SIZE]) -> bool {
    match numbers.iter().position(|&n| n == EIGHT) {
        Some(slot) => {
            numbers.swap(slot, CENTER_SLOT);
            true
        }
        None => false,
    }
}

/// Lay out a rack from an explicit slot order
pub fn rack_from_numbers(anchor: Vec2, ball_size: f32, numbers: [u8; RACK_SIZE]) -> [RackSlot; RACK_SIZE] {
    let positions = slot_positions(anchor, ball_size);
    let mut slots = [RackSlot {
        number: 0,
        row: 0,
        position: Vec2::ZERO,
    }; RACK_SIZE];
    for (slot, rack_slot) in slots.iter_mut().enumerate() {
        *rack_slot = RackSlot {
            number: numbers[slot],
            row: slot_row_col(slot).0,
            position: positions[slot],
        };
    }
    slots
}

/// Lay out a seeded random rack
pub fn rack(anchor: Vec2, ball_size: f32, seed: u64) -> [RackSlot; RACK_SIZE] {
    let mut rng = Pcg32::seed_from_u64(seed);
    let numbers = shuffled_numbers(&mut rng);
    log::info!("Racked with seed {}: {:?}", seed, numbers);
    rack_from_numbers(anchor, ball_size, numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::vector::distance;
    use proptest::prelude::*;

    fn is_permutation(numbers: &[u8; RACK_SIZE]) -> bool {
        let mut sorted = *numbers;
        sorted.sort_unstable();
        sorted.iter().copied().eq(1..=15)
    }

    #[test]
    fn test_slot_row_col() {
        assert_eq!(slot_row_col(0), (0, 0));
        assert_eq!(slot_row_col(1), (1, 0));
        assert_eq!(slot_row_col(2), (1, 1));
        assert_eq!(slot_row_col(CENTER_SLOT), (2, 1));
        assert_eq!(slot_row_col(10), (4, 0));
        assert_eq!(slot_row_col(RACK_SIZE - 1), (RACK_ROWS - 1, RACK_ROWS - 1));
    }

    #[test]
    fn test_pattern_balance() {
        let solids = SLOT_PATTERN.iter().filter(|&&k| k == SlotKind::Solid).count();
        let stripes = SLOT_PATTERN.iter().filter(|&&k| k == SlotKind::Stripe).count();
        assert_eq!(solids, 7);
        assert_eq!(stripes, 7);
        assert_eq!(SLOT_PATTERN[CENTER_SLOT], SlotKind::Eight);
        // Back corners hold one of each group
        assert_ne!(SLOT_PATTERN[10], SLOT_PATTERN[14]);
    }

    #[test]
    fn test_positions_are_centred_and_packed() {
        let anchor = Vec2::new(100.0, -200.0);
        let positions = slot_positions(anchor, 20.0);

        assert_eq!(positions[0], anchor);
        assert_eq!(positions[CENTER_SLOT].x, anchor.x);
        // Each row is symmetric about the anchor
        assert_eq!(positions[1].x - anchor.x, anchor.x - positions[2].x);
        assert_eq!(positions[10].x - anchor.x, anchor.x - positions[14].x);
        // Rows grow toward -y
        assert!(positions[14].y < positions[0].y);

        // Neighbours touch
        assert!((distance(positions[0], positions[1]) - 40.0).abs() < 1e-3);
        assert!((distance(positions[1], positions[2]) - 40.0).abs() < 1e-3);
        assert!((distance(positions[4], positions[8]) - 40.0).abs() < 1e-3);
        for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                assert!(distance(a, b) > 40.0 - 1e-3);
            }
        }
    }

    #[test]
    fn test_place_eight_center_from_any_slot() {
        let mut numbers = [8, 1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15];
        assert!(place_eight_center(&mut numbers));
        assert_eq!(numbers[CENTER_SLOT], 8);
        assert_eq!(numbers[0], 4);
        assert!(is_permutation(&numbers));

        let mut no_eight = [1; RACK_SIZE];
        assert!(!place_eight_center(&mut no_eight));
    }

    #[test]
    fn test_rack_is_deterministic_per_seed() {
        let a = rack(Vec2::ZERO, 20.0, 7);
        let b = rack(Vec2::ZERO, 20.0, 7);
        assert_eq!(a, b);
        assert_eq!(a[CENTER_SLOT].number, 8);
        assert_eq!(a[CENTER_SLOT].row, 2);
    }

    proptest! {
        #[test]
        fn rack_is_a_permutation_with_eight_centred(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let numbers = shuffled_numbers(&mut rng);
            prop_assert_eq!(numbers[CENTER_SLOT], 8);
            prop_assert!(is_permutation(&numbers));
            for (number, kind) in numbers.iter().zip(SLOT_PATTERN) {
                match kind {
                    SlotKind::Solid => prop_assert!((1..=7).contains(number)),
                    SlotKind::Stripe => prop_assert!((9..=15).contains(number)),
                    SlotKind::Eight => prop_assert_eq!(*number, 8),
                }
            }
        }
    }
}
