//! Collision predicates and platform landing
//!
//! Platforms are one-way: only a falling (or resting) player whose feet have
//! entered the platform's top band lands. Nothing pushes back from below or
//! from the sides.

use super::rect::Rect;
use super::state::{Bullet, Coin, Enemy, Platform, Player, Spike};

/// Whether `player` lands on `platform` this frame
#[inline]
pub fn lands_on(player: &Player, platform: &Platform) -> bool {
    let p = &platform.rect;
    let bottom = player.bottom();
    player.vel.y >= 0.0 && player.rect().overlaps_x(p) && bottom > p.y && bottom <= p.bottom()
}

/// Snap the player onto the first platform it lands on
///
/// Returns true when the player is grounded after resolution.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) -> bool {
    player.on_ground = false;
    for platform in platforms {
        if lands_on(player, platform) {
            player.pos.y = platform.rect.y - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
            player.jump_count = 0;
        }
    }
    player.on_ground
}

pub fn touches_enemy(player: &Rect, enemy: &Enemy) -> bool {
    player.overlaps(&enemy.rect())
}

pub fn touches_spike(player: &Rect, spike: &Spike) -> bool {
    player.overlaps(&spike.footprint())
}

pub fn touches_coin(player: &Rect, coin: &Coin) -> bool {
    player.overlaps_circle(coin.pos, coin.radius)
}

/// Bullets are points for hit purposes
pub fn bullet_hits(bullet: &Bullet, enemy: &Enemy) -> bool {
    enemy.rect().contains_point(bullet.pos)
}

/// Index of the last enemy `bullet` hits, if any
pub fn find_enemy_hit(enemies: &[Enemy], bullet: &Bullet) -> Option<usize> {
    enemies.iter().rposition(|e| bullet_hits(bullet, e))
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::EnemyKind;
    use crate::tuning::Tuning;

    fn player_at(x: f32, y: f32, dy: f32) -> Player {
        let mut p = Player::new(&Tuning::default(), Vec2::new(x, y));
        p.vel.y = dy;
        p
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            size: Vec2::splat(40.0),
            min_x: x,
            max_x: x + 200.0,
            dir: 1.0,
            speed: 1.0,
            base_y: y,
            kind: EnemyKind::Walker,
        }
    }

    #[test]
    fn test_lands_when_falling_into_top_band() {
        let ground = [Platform::new(0.0, 450.0, 800.0, 50.0)];
        // Bottom at 451.5 after integrating a fall
        let mut player = player_at(50.0, 376.5, 1.5);
        assert!(resolve_platforms(&mut player, &ground));
        assert_eq!(player.pos.y, 450.0 - 75.0);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.jump_count, 0);
    }

    #[test]
    fn test_rising_through_platform_does_not_snap() {
        let ledge = [Platform::new(0.0, 300.0, 400.0, 50.0)];
        let mut player = player_at(50.0, 240.0, -8.0);
        player.jump_count = 1;
        assert!(!resolve_platforms(&mut player, &ledge));
        assert_eq!(player.pos.y, 240.0);
        assert_eq!(player.vel.y, -8.0);
        assert_eq!(player.jump_count, 1);
    }

    #[test]
    fn test_no_landing_below_the_band_or_beside() {
        let p = Platform::new(100.0, 300.0, 200.0, 50.0);
        // Feet below the platform's bottom edge
        assert!(!lands_on(&player_at(150.0, 300.0, 2.0), &p));
        // Exactly at the top edge is not inside yet
        assert!(!lands_on(&player_at(150.0, 225.0, 2.0), &p));
        // Flush against the left side
        assert!(!lands_on(&player_at(40.0, 240.0, 2.0), &p));
        // Resting (dy = 0) still counts
        assert!(lands_on(&player_at(150.0, 226.0, 0.0), &p));
    }

    #[test]
    fn test_bullet_point_containment() {
        let enemy = enemy_at(100.0, 100.0);
        let hit = Bullet {
            pos: Vec2::new(120.0, 120.0),
            vel_x: 12.0,
            radius: 4.0,
            color: 0,
        };
        assert!(bullet_hits(&hit, &enemy));
        let edge = Bullet {
            pos: Vec2::new(140.0, 120.0),
            ..hit
        };
        assert!(!bullet_hits(&edge, &enemy));
        let enemies = [enemy_at(0.0, 0.0), enemy_at(100.0, 100.0)];
        assert_eq!(find_enemy_hit(&enemies, &hit), Some(1));
        let miss = Bullet {
            pos: Vec2::new(500.0, 500.0),
            ..hit
        };
        assert_eq!(find_enemy_hit(&enemies, &miss), None);
    }

    #[test]
    fn test_spike_and_coin_predicates() {
        let player = Rect::new(100.0, 375.0, 60.0, 75.0);
        let spike = Spike {
            anchor: Vec2::new(140.0, 450.0),
        };
        assert!(touches_spike(&player, &spike));
        let far = Spike {
            anchor: Vec2::new(156.0, 450.0),
        };
        // Footprint starts at 161, player ends at 160
        assert!(!touches_spike(&player, &far));

        let coin = Coin {
            pos: Vec2::new(165.0, 400.0),
            radius: 10.0,
            taken: false,
        };
        assert!(touches_coin(&player, &coin));
        let coin = Coin {
            pos: Vec2::new(175.0, 400.0),
            ..coin
        };
        assert!(!touches_coin(&player, &coin));
        assert!(touches_enemy(&player, &enemy_at(150.0, 420.0)));
    }
}
