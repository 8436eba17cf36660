//! Avatar factory: scatters fresh avatars over the arena.

use bevy::prelude::*;
use rand::Rng;

use crate::arena::Arena;
use crate::avatar::{AvatarState, SPAWN_HEIGHT};

/// Pick a spawn point on the integer grid covering the arena.
///
/// x and z are drawn independently and uniformly from `floor(u * (size + 1)) - size / 2`,
/// which for an even size yields every integer in `[-size/2, size/2]`.
pub fn spawn_point<R: Rng + ?Sized>(rng: &mut R, arena: &Arena) -> Vec3 {
    let size = arena.size;
    let mut coord = || (rng.gen::<f32>() * (size + 1.0)).floor() - size / 2.0;
    let x = coord();
    let z = coord();
    Vec3::new(x, SPAWN_HEIGHT, z)
}

/// Build `count` avatars at random spawn points, each dropping in from [`SPAWN_HEIGHT`].
pub fn spawn_avatars<R: Rng + ?Sized>(count: usize, arena: &Arena, rng: &mut R) -> Vec<AvatarState> {
    (0..count)
        .map(|_| AvatarState::new(spawn_point(rng, arena)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_ten_on_hundred_plane() {
        let mut rng = StdRng::seed_from_u64(7);
        let avatars = spawn_avatars(10, &Arena::new(100.0), &mut rng);

        assert_eq!(avatars.len(), 10);
        for avatar in &avatars {
            let p = avatar.position;
            assert!((-50.0..=50.0).contains(&p.x), "x = {}", p.x);
            assert!((-50.0..=50.0).contains(&p.z), "z = {}", p.z);
            assert_eq!(p.y, 20.0);
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.z.fract(), 0.0);
            assert_eq!(avatar.vertical_velocity, 0.0);
            assert!(!avatar.can_jump);
        }
    }

    #[test]
    fn test_spawn_covers_both_edges() {
        let mut rng = StdRng::seed_from_u64(1234);
        let arena = Arena::new(4.0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            let p = spawn_point(&mut rng, &arena);
            seen.insert(p.x as i32);
        }
        let expected: std::collections::HashSet<i32> = (-2..=2).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_spawn_is_seed_deterministic() {
        let arena = Arena::default();
        let a = spawn_avatars(5, &arena, &mut StdRng::seed_from_u64(99));
        let b = spawn_avatars(5, &arena, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawn_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(spawn_avatars(0, &Arena::default(), &mut rng).is_empty());
    }
}
