//! Garden configuration.
//!
//! Everything here is set once when a garden is built; the simulation never
//! writes back to it. Every field has a default, so partial files load.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use greenthumb_common::{tags, LayerMask};

use crate::detector::DetectionRegion;
use crate::growth::GrowthSettings;
use crate::pour::DEFAULT_POUR_THRESHOLD;
use crate::progress::DEFAULT_TIME_TO_FILL;
use crate::refill::DEFAULT_REFILL_RATE;
use crate::spatial::DEFAULT_HIT_CAPACITY;

/// Pour angle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PourConfig {
    /// Pour angle below which the can pours (degrees)
    pub threshold_degrees: f32,
    /// Extra degrees past the threshold before pouring stops (0 = none)
    pub hysteresis_degrees: f32,
}

impl Default for PourConfig {
    fn default() -> Self {
        Self {
            threshold_degrees: DEFAULT_POUR_THRESHOLD,
            hysteresis_degrees: 0.0,
        }
    }
}

/// Watering can capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselConfig {
    /// Capacity in units
    pub total_units: u32,
    /// Units at scene start
    pub initial_units: u32,
    /// Seconds of pouring per unit used (0 = pouring is free)
    pub drain_interval: f32,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            total_units: 5,
            initial_units: 5,
            drain_interval: 0.0,
        }
    }
}

/// Refill station settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefillConfig {
    /// Seconds per refilled unit
    pub refill_rate: f32,
    /// Tag of colliders that refill the can
    pub source_tag: String,
}

impl Default for RefillConfig {
    fn default() -> Self {
        Self {
            refill_rate: DEFAULT_REFILL_RATE,
            source_tag: tags::POT.to_string(),
        }
    }
}

/// Pour area detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Detection box in the detector's local space (None disables detection)
    pub region: Option<DetectionRegion>,
    /// Tag of colliders that can be watered
    pub receiver_tag: String,
    /// Layers searched
    pub layers: LayerMask,
    /// Maximum overlap results per tick
    pub capacity: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            region: Some(DetectionRegion {
                center: Vec3::new(0.0, -0.5, 0.0),
                size: Vec3::new(0.6, 1.0, 0.6),
                offset: Vec3::ZERO,
            }),
            receiver_tag: tags::WATER_RECEIVER.to_string(),
            layers: LayerMask::ALL,
            capacity: DEFAULT_HIT_CAPACITY,
        }
    }
}

/// Pour gauge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Seconds of pouring to fill the gauge
    pub time_to_fill: f32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            time_to_fill: DEFAULT_TIME_TO_FILL,
        }
    }
}

/// One plant in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// Display name
    pub name: String,
    /// Collider center
    pub position: Vec3,
    /// Collider radius
    pub radius: f32,
    /// Collider layer
    pub layer: u32,
    /// Number of stage models
    pub stage_count: usize,
    /// Growth tunables
    #[serde(flatten)]
    pub growth: GrowthSettings,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            name: "Plant".to_string(),
            position: Vec3::ZERO,
            radius: 0.15,
            layer: 0,
            stage_count: 3,
            growth: GrowthSettings::default(),
        }
    }
}

impl PlantConfig {
    fn salad(name: &str, x: f32, sprites: [&str; 1], fact: &str) -> Self {
        Self {
            name: name.to_string(),
            position: Vec3::new(x, 0.0, 0.0),
            growth: GrowthSettings {
                transition_sprites: sprites.iter().map(ToString::to_string).collect(),
                fact: Some(fact.to_string()),
                ..GrowthSettings::default()
            },
            ..Self::default()
        }
    }
}

/// Completion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Watch every plant for the all-grown notification
    pub enabled: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Full garden configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Pour angle settings
    pub pour: PourConfig,
    /// Watering can capacity
    pub vessel: VesselConfig,
    /// Refill station
    pub refill: RefillConfig,
    /// Pour area detection
    pub detector: DetectorConfig,
    /// Pour gauge
    pub indicator: IndicatorConfig,
    /// Plants in the scene
    pub plants: Vec<PlantConfig>,
    /// All-grown notification
    pub completion: CompletionConfig,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            pour: PourConfig::default(),
            vessel: VesselConfig::default(),
            refill: RefillConfig::default(),
            detector: DetectorConfig::default(),
            indicator: IndicatorConfig::default(),
            plants: vec![
                PlantConfig::salad(
                    "Lettuce",
                    -1.0,
                    ["lettuce_sprout"],
                    "Lettuce is about 95% water.",
                ),
                PlantConfig::salad(
                    "Tomato",
                    0.0,
                    ["tomato_flower"],
                    "Tomatoes are botanically a fruit.",
                ),
                PlantConfig::salad(
                    "Cucumber",
                    1.0,
                    ["cucumber_vine"],
                    "Cucumbers belong to the same family as melons.",
                ),
            ],
            completion: CompletionConfig::default(),
        }
    }
}

impl GardenConfig {
    /// Clamps values to sensible ranges.
    ///
    /// Stage and threshold counts are left alone: a mismatch disables only
    /// the affected plant when it is built.
    pub fn validate(&mut self) {
        // Pour
        self.pour.threshold_degrees = self.pour.threshold_degrees.clamp(0.0, 180.0);
        self.pour.hysteresis_degrees = self.pour.hysteresis_degrees.clamp(0.0, 90.0);

        // Vessel
        self.vessel.total_units = self.vessel.total_units.max(1);
        self.vessel.initial_units = self.vessel.initial_units.min(self.vessel.total_units);
        self.vessel.drain_interval = self.vessel.drain_interval.max(0.0);

        // Refill
        self.refill.refill_rate = self.refill.refill_rate.max(0.01);

        // Detector
        self.detector.capacity = self.detector.capacity.clamp(1, 256);

        // Indicator
        self.indicator.time_to_fill = self.indicator.time_to_fill.max(0.1);

        // Plants
        for plant in &mut self.plants {
            plant.radius = plant.radius.max(0.01);
            plant.layer = plant.layer.min(31);
            plant.growth.popup_duration = plant.growth.popup_duration.max(0.0);
            for threshold in &mut plant.growth.stage_thresholds {
                *threshold = threshold.clamp(0.0, 1.0);
            }
        }
    }
}
