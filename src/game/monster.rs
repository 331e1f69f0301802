//! The Otyugh, a solitary and extremely smelly cave-dwelling monster.

use crate::config::HITS_TO_KILL;
use crate::game::Position;
use rand::rngs::StdRng;
use rand::Rng;

/// A stationary monster with a hit counter and a probabilistic lethality rule.
///
/// An Otyugh at full health devours an intruding player outright; once wounded
/// by an arrow it kills only half the time; after two hits it is dead and
/// harmless.
#[derive(Debug, Clone)]
pub struct Otyugh {
    dwelling: Position,
    hits_taken: u8,
}

impl Otyugh {
    pub(crate) fn new(dwelling: Position) -> Self {
        Self {
            dwelling,
            hits_taken: 0,
        }
    }

    /// The cave this monster dwells in, fixed at creation.
    pub fn dwelling(&self) -> Position {
        self.dwelling
    }

    /// Arrow hits this monster has taken so far.
    pub fn hits_taken(&self) -> u8 {
        self.hits_taken
    }

    /// True until the monster has taken two hits.
    pub fn is_alive(&self) -> bool {
        self.hits_taken < HITS_TO_KILL
    }

    pub(crate) fn take_hit(&mut self) {
        self.hits_taken += 1;
    }

    /// Resolves an encounter with the player: certain death at full health,
    /// a coin flip when wounded, no threat once dead.
    pub(crate) fn devours_player(&self, rng: &mut StdRng) -> bool {
        match self.hits_taken {
            0 => true,
            1 => rng.gen_range(0..2) == 0,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_fresh_monster_always_devours() {
        let monster = Otyugh::new(Position::new(0, 0));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(monster.devours_player(&mut rng));
        }
    }

    #[test]
    fn test_dead_monster_never_devours() {
        let mut monster = Otyugh::new(Position::new(0, 0));
        monster.take_hit();
        monster.take_hit();
        assert!(!monster.is_alive());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(!monster.devours_player(&mut rng));
        }
    }

    #[test]
    fn test_wounded_monster_sometimes_devours() {
        let mut monster = Otyugh::new(Position::new(0, 0));
        monster.take_hit();
        assert!(monster.is_alive());

        let mut rng = StdRng::seed_from_u64(7);
        let kills = (0..200)
            .filter(|_| monster.devours_player(&mut rng))
            .count();
        assert!(kills > 0 && kills < 200, "wounded kill rate should be fractional");
    }
}
