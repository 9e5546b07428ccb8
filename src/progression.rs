//! Level/xp progression and the upgrade catalog
//!
//! The simulation emits kill and threshold events; this controller owns the
//! stat block, rolls upgrade choices, and commits the selected transform.
//! While a choice is pending the host holds the phase in `Upgrade`, so the
//! simulation never advances mid-decision.
//!
//! Upgrades are a tagged catalog of pure data transforms - exact multipliers
//! are part of the external balance contract.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::XP_CURVE_MULT;
use crate::sim::PlayerStats;

/// Number of upgrade choices offered per level-up
pub const CHOICES_PER_LEVEL: usize = 3;

/// The upgrade catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// +25% max hp and heal to full
    VitalityCore,
    /// +30% attack power
    SerratedEdge,
    /// +20 blade length
    ExtendedReach,
    /// +15% movement speed
    Overdrive,
    /// +2 blade width
    BroadBlade,
    /// +50% attack power
    NanoSiphon,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::VitalityCore,
        UpgradeKind::SerratedEdge,
        UpgradeKind::ExtendedReach,
        UpgradeKind::Overdrive,
        UpgradeKind::BroadBlade,
        UpgradeKind::NanoSiphon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::VitalityCore => "Vitality Core",
            UpgradeKind::SerratedEdge => "Serrated Edge",
            UpgradeKind::ExtendedReach => "Extended Reach",
            UpgradeKind::Overdrive => "Overdrive",
            UpgradeKind::BroadBlade => "Broad Blade",
            UpgradeKind::NanoSiphon => "Nano Siphon",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeKind::VitalityCore => "Increase Max HP by 25% and heal to full.",
            UpgradeKind::SerratedEdge => "Increase Attack Power by 30%.",
            UpgradeKind::ExtendedReach => "Increase Blade Length by 20px.",
            UpgradeKind::Overdrive => "Increase Movement Speed by 15%.",
            UpgradeKind::BroadBlade => "Increase Blade Width for easier hits.",
            UpgradeKind::NanoSiphon => "Attacks deal 50% more damage.",
        }
    }

    /// Apply this upgrade as a pure transform over the stat block
    pub fn apply(&self, stats: &PlayerStats) -> PlayerStats {
        let mut s = stats.clone();
        match self {
            UpgradeKind::VitalityCore => {
                s.max_hp = stats.max_hp * 1.25;
                s.hp = s.max_hp;
            }
            UpgradeKind::SerratedEdge => s.attack_power = stats.attack_power * 1.3,
            UpgradeKind::ExtendedReach => s.blade_length = stats.blade_length + 20.0,
            UpgradeKind::Overdrive => s.move_speed = stats.move_speed * 1.15,
            UpgradeKind::BroadBlade => s.blade_width = stats.blade_width + 2.0,
            UpgradeKind::NanoSiphon => s.attack_power = stats.attack_power * 1.5,
        }
        s
    }
}

/// Owns the stat block and the pending upgrade choice
#[derive(Debug, Clone, Default)]
pub struct Progression {
    pub stats: PlayerStats,
    pending: Vec<UpgradeKind>,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a fresh run
    pub fn reset(&mut self) {
        self.stats = PlayerStats::default();
        self.pending.clear();
    }

    /// Roll the upgrade choices for a level-up, drawn without replacement
    pub fn roll_choices(&mut self, rng: &mut impl Rng) -> &[UpgradeKind] {
        let mut pool: Vec<UpgradeKind> = UpgradeKind::ALL.to_vec();
        self.pending.clear();
        for _ in 0..CHOICES_PER_LEVEL {
            let i = rng.random_range(0..pool.len());
            self.pending.push(pool.swap_remove(i));
        }
        &self.pending
    }

    /// Choices currently on offer (empty outside a level-up)
    pub fn pending(&self) -> &[UpgradeKind] {
        &self.pending
    }

    /// Commit an upgrade: apply the transform, advance the level, carry the
    /// xp surplus, and grow the threshold by the fixed multiplier
    pub fn select(&mut self, choice: UpgradeKind) {
        self.stats = choice.apply(&self.stats);
        self.stats.level += 1;
        self.stats.xp = self.stats.xp.saturating_sub(self.stats.next_level_xp);
        self.stats.next_level_xp = (self.stats.next_level_xp as f32 * XP_CURVE_MULT) as u32;
        self.pending.clear();
        log::info!(
            "level {} - picked {}, next threshold {} xp",
            self.stats.level,
            choice.name(),
            self.stats.next_level_xp
        );
    }
}
