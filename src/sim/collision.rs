//! Collision detection and response
//!
//! Two independent passes over the table:
//! - ball vs cushion: reflect the velocity about the cushion normal
//! - ball vs ball: 1-D elastic exchange along the line of centres, then push
//!   the pair apart
//!
//! Cushion hits get no positional correction, so a ball may sit inside a rail
//! for a substep. Ball pairs are resolved one at a time in ascending index
//! order; simultaneous multi-ball contacts therefore depend on that order.

use glam::Vec2;

use super::ball::Ball;
use super::cushion::Cushion;
use super::vector::{distance, dot, reflect, unit};

/// 1-D elastic collision
///
/// Returns the post-impact velocities along the collision axis. Equal masses
/// exchange velocities.
#[inline]
pub fn elastic_1d(m1: f32, u1: f32, m2: f32, u2: f32) -> (f32, f32) {
    let total = m1 + m2;
    let v1 = (m1 - m2) / total * u1 + 2.0 * m2 / total * u2;
    let v2 = 2.0 * m1 / total * u1 + (m2 - m1) / total * u2;
    (v1, v2)
}

/// Test the ball against every cushion in ring order
///
/// Each touching cushion reflects the velocity in turn, so a ball wedged in a
/// corner or on a rail/jaw joint bounces off both. Returns the number of
/// reflections.
pub fn ball_cushion_collision(ball: &mut Ball, cushions: &[Cushion], eps: f32) -> u32 {
    let mut hits = 0;
    for (index, cushion) in cushions.iter().enumerate() {
        if cushion.collision_eps(ball.position, ball.radius, eps) {
            ball.velocity = reflect(ball.velocity, cushion.normal());
            log::trace!("ball {} hit cushion {}", ball.number, index);
            hits += 1;
        }
    }
    hits
}

/// Cushion pass over every ball in play
///
/// Returns the total number of reflections.
pub fn resolve_cushion_collisions(balls: &mut [Ball], cushions: &[Cushion], eps: f32) -> u32 {
    balls
        .iter_mut()
        .filter(|b| b.in_play)
        .map(|ball| ball_cushion_collision(ball, cushions, eps))
        .sum()
}

/// Resolve one ball pair if they overlap
///
/// Coincident centres give a zero normal, which leaves both balls untouched.
pub fn ball_ball_collision(a: &mut Ball, b: &mut Ball) -> bool {
    if distance(a.position, b.position) >= a.radius + b.radius {
        return false;
    }

    let normal = unit(b.position - a.position);

    let a_along = dot(a.velocity, normal);
    let b_along = dot(b.velocity, normal);
    let a_across = a.velocity - normal * a_along;
    let b_across = b.velocity - normal * b_along;

    let (a_new, b_new) = elastic_1d(a.mass, a_along, b.mass, b_along);
    a.velocity = normal * a_new + a_across;
    b.velocity = normal * b_new + b_across;
    a.is_moving = a.moving();
    b.is_moving = b.moving();

    let push = (a.radius + b.radius) / 2.0;
    a.position -= normal * push;
    b.position += normal * push;

    log::trace!("balls {} and {} collided", a.number, b.number);
    true
}

/// Ball-ball pass over every unordered pair (i < j) of balls in play
///
/// Returns the number of resolved contacts. Non-overlapping pairs are left
/// exactly as they were.
pub fn resolve_ball_collisions(balls: &mut [Ball]) -> u32 {
    let mut hits = 0;
    for j in 1..balls.len() {
        let (head, tail) = balls.split_at_mut(j);
        let b = &mut tail[0];
        if !b.in_play {
            continue;
        }
        for a in head.iter_mut().filter(|a| a.in_play) {
            if ball_ball_collision(a, b) {
                hits += 1;
            }
        }
    }
    hits
}

/// Index pairs whose centres are closer than `radius_sum - eps`
pub fn overlapping_pairs(balls: &[Ball], eps: f32) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in balls.iter().enumerate().filter(|(_, b)| b.in_play) {
        for (j, b) in balls.iter().enumerate().skip(i + 1).filter(|(_, b)| b.in_play) {
            if distance(a.position, b.position) < a.radius + b.radius - eps {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Smallest centre distance between any two balls in play
pub fn min_separation(balls: &[Ball]) -> Option<f32> {
    let positions: Vec<Vec2> = balls.iter().filter(|b| b.in_play).map(|b| b.position).collect();
    let mut min: Option<f32> = None;
    for (i, &a) in positions.iter().enumerate() {
        for &b in &positions[i + 1..] {
            let d = distance(a, b);
            min = Some(min.map_or(d, |m| m.min(d)));
        }
    }
    min
}
