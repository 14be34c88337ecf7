//! Empirical collision measurement over a range of table capacities.
//!
//! For every capacity the driver runs a number of trials. Each trial fills a
//! fresh table with keys drawn uniformly from a key range and reads
//! `count_collisions()`. The per-capacity metric is
//!
//! ```text
//! probability = Σ (elements - collisions) / (elements * trials)
//! ```
//!
//! and the sweep stops at the first capacity whose metric falls below the
//! configured threshold.

use crate::chained_table::ChainedHashTable;
use crate::error::ConfigError;
use core::fmt;
use core::ops::RangeInclusive;
use rand::Rng;

/// Parameters of a collision sweep. `Default` gives 20 elements per trial,
/// 100 trials, capacities 25 through 475 in steps of 50, keys in
/// `1..=1000`, and a stop threshold of 0.5.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub elements_per_trial: usize,
    pub trials: usize,
    pub first_capacity: usize,
    pub last_capacity: usize,
    pub capacity_step: usize,
    pub key_range: RangeInclusive<u32>,
    pub stop_threshold: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            elements_per_trial: 20,
            trials: 100,
            first_capacity: 25,
            last_capacity: 475,
            capacity_step: 50,
            key_range: 1..=1000,
            stop_threshold: 0.5,
        }
    }
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements_per_trial(mut self, n: usize) -> Self {
        self.elements_per_trial = n;
        self
    }

    pub fn with_trials(mut self, n: usize) -> Self {
        self.trials = n;
        self
    }

    /// Capacities `first, first + step, ...` up to and including `last`.
    pub fn with_capacities(mut self, first: usize, last: usize, step: usize) -> Self {
        self.first_capacity = first;
        self.last_capacity = last;
        self.capacity_step = step;
        self
    }

    pub fn with_key_range(mut self, keys: RangeInclusive<u32>) -> Self {
        self.key_range = keys;
        self
    }

    pub fn with_stop_threshold(mut self, threshold: f64) -> Self {
        self.stop_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elements_per_trial == 0 {
            return Err(ConfigError::NoElements);
        }
        if self.trials == 0 {
            return Err(ConfigError::NoTrials);
        }
        if self.capacity_step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.first_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.first_capacity > self.last_capacity {
            return Err(ConfigError::EmptyCapacityRange {
                start: self.first_capacity,
                end: self.last_capacity,
            });
        }
        if self.key_range.is_empty() {
            return Err(ConfigError::EmptyKeyRange {
                low: *self.key_range.start(),
                high: *self.key_range.end(),
            });
        }
        if !(0.0..=1.0).contains(&self.stop_threshold) {
            return Err(ConfigError::InvalidThreshold(self.stop_threshold));
        }
        Ok(())
    }

    /// Capacities the sweep visits when it does not stop early.
    pub fn capacities(&self) -> impl Iterator<Item = usize> {
        (self.first_capacity..=self.last_capacity).step_by(self.capacity_step.max(1))
    }
}

/// Aggregate over all trials at one capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityReport {
    pub capacity: usize,
    /// Sum of `count_collisions()` over all trials.
    pub total_collisions: usize,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentReport {
    pub capacities: Vec<CapacityReport>,
    /// First capacity whose probability fell below the threshold, if any.
    pub threshold_capacity: Option<usize>,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.capacities {
            writeln!(
                f,
                "Table size: {}, Collision probability: {}",
                r.capacity, r.probability
            )?;
        }
        if let Some(cap) = self.threshold_capacity {
            writeln!(f, "Collision probability fell below threshold at table size: {}", cap)?;
        }
        Ok(())
    }
}

/// Runs one trial: a fresh `capacity`-bucket table, filled with random keys.
/// Returns the table's collision count.
pub fn run_trial<R>(
    capacity: usize,
    elements: usize,
    keys: &RangeInclusive<u32>,
    rng: &mut R,
) -> Result<usize, ConfigError>
where
    R: Rng + ?Sized,
{
    if keys.is_empty() {
        return Err(ConfigError::EmptyKeyRange {
            low: *keys.start(),
            high: *keys.end(),
        });
    }
    let mut table: ChainedHashTable<u32, ()> = ChainedHashTable::with_capacity(capacity)?;
    for _ in 0..elements {
        table.insert(rng.gen_range(keys.clone()), ());
    }
    Ok(table.count_collisions())
}

/// Sweeps the configured capacities and reports the metric for each.
pub fn run_experiment<R>(config: &ExperimentConfig, rng: &mut R) -> Result<ExperimentReport, ConfigError>
where
    R: Rng + ?Sized,
{
    config.validate()?;
    let elements = config.elements_per_trial;
    let mut report = ExperimentReport {
        capacities: Vec::new(),
        threshold_capacity: None,
    };

    for capacity in config.capacities() {
        let mut total_collisions = 0usize;
        let mut distinct = 0usize;
        for _ in 0..config.trials {
            let collisions = run_trial(capacity, elements, &config.key_range, rng)?;
            total_collisions += collisions;
            distinct += elements - collisions;
        }
        let probability = distinct as f64 / (elements * config.trials) as f64;
        log::info!(
            "capacity {}: {} collisions over {} trials, probability {:.4}",
            capacity,
            total_collisions,
            config.trials,
            probability
        );
        report.capacities.push(CapacityReport {
            capacity,
            total_collisions,
            probability,
        });

        if probability < config.stop_threshold {
            log::debug!(
                "probability {:.4} below threshold {} at capacity {}; stopping",
                probability,
                config.stop_threshold,
                capacity
            );
            report.threshold_capacity = Some(capacity);
            break;
        }
    }
    Ok(report)
}
