//! Turn phases.

use serde::{Deserialize, Serialize};

/// The step of the current turn.
///
/// ```text
/// Attack ──► SufferDamage ──► Attack (next player)
///   │  └───► Attack (boss attack is 0, next player)
///   └──────► SpecialSelect ──► Attack (chosen player)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Active player plays cards, yields, or plays a special.
    #[default]
    Attack,
    /// Active player must discard enough to cover the boss's attack.
    SufferDamage,
    /// A special was played; its player picks who goes next.
    SpecialSelect,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Attack => "attack",
            Phase::SufferDamage => "suffer damage",
            Phase::SpecialSelect => "special select",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_is_attack() {
        assert_eq!(Phase::default(), Phase::Attack);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::SufferDamage.to_string(), "suffer damage");
    }
}
