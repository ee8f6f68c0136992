//! Run-scoped modifier catalog and effect resolution
//!
//! A modifier is chosen once per run. The catalog is immutable; selection
//! produces a structural copy whose resolved effects may be mutated during
//! play (phase charges are consumed) without ever touching the catalog.

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

/// Gameplay-parameter overlay carried by a catalog entry.
///
/// Every field is optional; unset fields resolve to neutral values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModifierEffect {
    pub speed_mult: Option<f32>,
    pub size_mult: Option<f32>,
    pub point_multiplier: Option<f32>,
    pub extra_lives: Option<u32>,
    pub magnet_range_mult: Option<f32>,
    pub phase_charges: Option<u32>,
    pub time_dilation: bool,
}

impl ModifierEffect {
    /// Fill unset fields with neutral values (multiplier 1, additive 0)
    pub fn resolve(&self) -> ResolvedEffects {
        ResolvedEffects {
            speed_mult: self.speed_mult.unwrap_or(1.0),
            size_mult: self.size_mult.unwrap_or(1.0),
            point_multiplier: self.point_multiplier.unwrap_or(1.0),
            extra_lives: self.extra_lives.unwrap_or(0),
            magnet_range_mult: self.magnet_range_mult.unwrap_or(1.0),
            phase_charges: self.phase_charges.unwrap_or(0),
            time_dilation: self.time_dilation,
        }
    }
}

/// Fully-resolved effect values applied to a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEffects {
    pub speed_mult: f32,
    pub size_mult: f32,
    pub point_multiplier: f32,
    pub extra_lives: u32,
    pub magnet_range_mult: f32,
    pub phase_charges: u32,
    pub time_dilation: bool,
}

impl Default for ResolvedEffects {
    fn default() -> Self {
        ModifierEffect::default().resolve()
    }
}

impl ResolvedEffects {
    /// Whether the modifier itself grants magnet attraction
    pub fn grants_magnet(&self) -> bool {
        self.magnet_range_mult > 1.0
    }
}

/// An immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifier {
    pub name: &'static str,
    pub description: &'static str,
    pub effect: ModifierEffect,
}

impl Modifier {
    /// Copy this entry into the mutable per-run form
    pub fn activate(&self) -> ActiveModifier {
        ActiveModifier {
            name: self.name,
            effects: self.effect.resolve(),
        }
    }
}

/// The chosen modifier, owned by the run and mutated during play
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveModifier {
    pub name: &'static str,
    pub effects: ResolvedEffects,
}

/// Number of options offered per ModifierSelect entry
pub const CHOICES: usize = 3;

/// The canonical 8-entry catalog
pub static MODIFIERS: [Modifier; 8] = [
    Modifier {
        name: "Speed Demon",
        description: "50% faster movement speed",
        effect: ModifierEffect {
            speed_mult: Some(1.5),
            size_mult: None,
            point_multiplier: None,
            extra_lives: None,
            magnet_range_mult: None,
            phase_charges: None,
            time_dilation: false,
        },
    },
    Modifier {
        name: "Giant Mode",
        description: "2x larger but 2x points",
        effect: ModifierEffect {
            speed_mult: None,
            size_mult: Some(2.0),
            point_multiplier: Some(2.0),
            extra_lives: None,
            magnet_range_mult: None,
            phase_charges: None,
            time_dilation: false,
        },
    },
    Modifier {
        name: "Tiny Mode",
        description: "0.5x size, 25% faster",
        effect: ModifierEffect {
            speed_mult: Some(1.25),
            size_mult: Some(0.5),
            point_multiplier: None,
            extra_lives: None,
            magnet_range_mult: None,
            phase_charges: None,
            time_dilation: false,
        },
    },
    Modifier {
        name: "Shield Bearer",
        description: "Start with 1 extra life",
        effect: ModifierEffect {
            speed_mult: None,
            size_mult: None,
            point_multiplier: None,
            extra_lives: Some(1),
            magnet_range_mult: None,
            phase_charges: None,
            time_dilation: false,
        },
    },
    Modifier {
        name: "Point Multiplier",
        description: "All points worth 2x",
        effect: ModifierEffect {
            speed_mult: None,
            size_mult: None,
            point_multiplier: Some(2.0),
            extra_lives: None,
            magnet_range_mult: None,
            phase_charges: None,
            time_dilation: false,
        },
    },
    Modifier {
        name: "Magnet",
        description: "Attract power-ups from further away",
        effect: ModifierEffect {
            speed_mult: None,
            size_mult: None,
            point_multiplier: None,
            extra_lives: None,
            magnet_range_mult: Some(2.0),
            phase_charges: None,
            time_dilation: false,
        },
    },
    Modifier {
        name: "Phase Walker",
        description: "Pass through 1 obstacle per run",
        effect: ModifierEffect {
            speed_mult: None,
            size_mult: None,
            point_multiplier: None,
            extra_lives: None,
            magnet_range_mult: None,
            phase_charges: Some(1),
            time_dilation: false,
        },
    },
    Modifier {
        name: "Time Dilator",
        description: "Slow time when near obstacles",
        effect: ModifierEffect {
            speed_mult: None,
            size_mult: None,
            point_multiplier: None,
            extra_lives: None,
            magnet_range_mult: None,
            phase_charges: None,
            time_dilation: true,
        },
    },
];

/// Draw three distinct catalog entries with the run's seeded RNG
pub fn draw_choices(rng: &mut Pcg32) -> Vec<&'static Modifier> {
    let mut indices: Vec<usize> = (0..MODIFIERS.len()).collect();
    indices.shuffle(rng);
    indices.truncate(CHOICES);
    indices.into_iter().map(|i| &MODIFIERS[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn missing_fields_resolve_to_neutral() {
        let resolved = ModifierEffect::default().resolve();
        assert_eq!(resolved.speed_mult, 1.0);
        assert_eq!(resolved.size_mult, 1.0);
        assert_eq!(resolved.point_multiplier, 1.0);
        assert_eq!(resolved.extra_lives, 0);
        assert_eq!(resolved.magnet_range_mult, 1.0);
        assert_eq!(resolved.phase_charges, 0);
        assert!(!resolved.time_dilation);
        assert!(!resolved.grants_magnet());
    }

    #[test]
    fn catalog_entries_resolve_as_described() {
        let giant = MODIFIERS[1].activate();
        assert_eq!(giant.name, "Giant Mode");
        assert_eq!(giant.effects.size_mult, 2.0);
        assert_eq!(giant.effects.point_multiplier, 2.0);
        assert_eq!(giant.effects.speed_mult, 1.0);

        let walker = MODIFIERS[6].activate();
        assert_eq!(walker.effects.phase_charges, 1);

        let dilator = MODIFIERS[7].activate();
        assert!(dilator.effects.time_dilation);

        let magnet = MODIFIERS[5].activate();
        assert!(magnet.effects.grants_magnet());
    }

    #[test]
    fn active_copy_never_mutates_catalog() {
        let before = MODIFIERS[6];
        let mut active = MODIFIERS[6].activate();
        active.effects.phase_charges = 0;
        // A second run draws a pristine entry
        let again = MODIFIERS[6].activate();
        assert_eq!(again.effects.phase_charges, 1);
        assert_eq!(MODIFIERS[6], before);
    }

    #[test]
    fn draw_yields_three_distinct_entries() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..32 {
            let choices = draw_choices(&mut rng);
            assert_eq!(choices.len(), CHOICES);
            for i in 0..choices.len() {
                for j in (i + 1)..choices.len() {
                    assert_ne!(choices[i].name, choices[j].name);
                }
            }
        }
    }

    #[test]
    fn draw_is_deterministic_per_seed() {
        let mut a = Pcg32::seed_from_u64(9);
        let mut b = Pcg32::seed_from_u64(9);
        let names_a: Vec<_> = draw_choices(&mut a).iter().map(|m| m.name).collect();
        let names_b: Vec<_> = draw_choices(&mut b).iter().map(|m| m.name).collect();
        assert_eq!(names_a, names_b);
    }
}
