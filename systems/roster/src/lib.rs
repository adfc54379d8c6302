#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weighted enemy category selection and per-wave stat scaling.

use bastion_core::{CategoryTemplate, EnemyCategory, EnemyProfile};
use rand::Rng;
use thiserror::Error;

/// Additional multiplier applied to health, damage and reward per wave after the first.
const WAVE_SCALING: f64 = 0.2;
/// Speed added per wave number.
const SPEED_PER_WAVE: f32 = 0.05;
/// Boss categories only join the draw on waves divisible by this value.
const BOSS_WAVE_PERIOD: u32 = 5;

/// Reasons a roster cannot be assembled.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RosterError {
    /// A roster needs at least one category to fall back on.
    #[error("enemy roster must contain at least one category")]
    Empty,
    /// Spawn weights must be finite and non-negative.
    #[error("spawn weight {weight} of {category:?} is not a finite non-negative number")]
    InvalidWeight {
        /// Category carrying the offending weight.
        category: EnemyCategory,
        /// Offending weight.
        weight: f32,
    },
    /// Off boss waves only regular categories may spawn, so one is required.
    #[error("enemy roster must contain at least one non-boss category")]
    NoRegularCategory,
}

/// Ordered, non-empty list of enemy templates eligible for spawning.
///
/// The lowest-tier regular template doubles as the fallback when a draw
/// matches nothing, so every wave can spawn without a boss.
#[derive(Clone, Debug)]
pub struct Roster {
    templates: Vec<CategoryTemplate>,
    fallback: CategoryTemplate,
}

impl Roster {
    /// Builds a roster from explicit templates.
    pub fn new(templates: Vec<CategoryTemplate>) -> Result<Self, RosterError> {
        if templates.is_empty() {
            return Err(RosterError::Empty);
        }

        if let Some(template) = templates
            .iter()
            .find(|template| !template.spawn_weight.is_finite() || template.spawn_weight < 0.0)
        {
            return Err(RosterError::InvalidWeight {
                category: template.category,
                weight: template.spawn_weight,
            });
        }

        let fallback = lowest_regular(&templates).ok_or(RosterError::NoRegularCategory)?;
        Ok(Self {
            templates,
            fallback,
        })
    }

    /// Builds a roster from the stock templates of the provided categories.
    pub fn from_categories(categories: &[EnemyCategory]) -> Result<Self, RosterError> {
        Self::new(
            categories
                .iter()
                .map(|category| category.template())
                .collect(),
        )
    }

    /// Roster containing every stock category.
    #[must_use]
    pub fn stock() -> Self {
        Self {
            templates: EnemyCategory::ALL
                .iter()
                .map(|category| category.template())
                .collect(),
            fallback: EnemyCategory::Basic.template(),
        }
    }

    /// Templates in roster order.
    #[must_use]
    pub fn templates(&self) -> &[CategoryTemplate] {
        &self.templates
    }

    /// Picks a template for `wave` with probability proportional to its weight.
    ///
    /// Boss templates only take part on boss waves. When no eligible weight
    /// remains, the lowest-tier regular template is returned.
    pub fn select<R>(&self, wave: u32, rng: &mut R) -> CategoryTemplate
    where
        R: Rng + ?Sized,
    {
        let fallback = self.fallback;
        let boss_wave = is_boss_wave(wave);
        let eligible = || {
            self.templates
                .iter()
                .filter(move |template| !template.boss || boss_wave)
        };

        let total: f32 = eligible().map(|template| template.spawn_weight).sum();
        if total <= 0.0 {
            return fallback;
        }

        let mut remaining = rng.gen_range(0.0..total);
        for template in eligible() {
            remaining -= template.spawn_weight;
            if remaining <= 0.0 {
                return *template;
            }
        }

        fallback
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::stock()
    }
}

fn lowest_regular(templates: &[CategoryTemplate]) -> Option<CategoryTemplate> {
    templates
        .iter()
        .filter(|template| !template.boss)
        .min_by_key(|template| template.category)
        .copied()
}

/// Reports whether boss templates may appear on `wave`.
#[must_use]
pub const fn is_boss_wave(wave: u32) -> bool {
    wave >= BOSS_WAVE_PERIOD && wave % BOSS_WAVE_PERIOD == 0
}

/// Multiplier applied to health, damage and reward on `wave`.
#[must_use]
pub fn wave_multiplier(wave: u32) -> f64 {
    1.0 + f64::from(wave.saturating_sub(1)) * WAVE_SCALING
}

/// Scales `template` to the strength of `wave`.
#[must_use]
pub fn instantiate(template: &CategoryTemplate, wave: u32) -> EnemyProfile {
    let multiplier = wave_multiplier(wave);
    let scale = |value: u32| (f64::from(value) * multiplier).round() as u32;

    EnemyProfile {
        category: template.category,
        health: scale(template.base_health),
        speed: template.base_speed + wave as f32 * SPEED_PER_WAVE,
        attack_damage: scale(template.base_damage),
        reward: scale(template.reward),
        upgrade_points: template.upgrade_points,
    }
}
