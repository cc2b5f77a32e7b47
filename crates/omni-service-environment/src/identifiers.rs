use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const LOWEST_SUFFIX: u32 = 1000;
const HIGHEST_SUFFIX: u32 = 9999;
const RANDOM_DRAWS: usize = 32;

/// Produces `<prefix>-<number>` identifiers that do not collide with the ids
/// already present in a collection.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: String,
    rng: StdRng,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(prefix: impl Into<String>, seed: u64) -> Self {
        Self {
            prefix: prefix.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn next_id(&mut self, taken: &HashSet<&str>) -> String {
        for _ in 0..RANDOM_DRAWS {
            let suffix = self.rng.random_range(LOWEST_SUFFIX..=HIGHEST_SUFFIX);
            let candidate = self.format(suffix);
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
        }

        // The random range is crowded, continue after the largest suffix in use.
        let largest_suffix = taken
            .iter()
            .filter_map(|id| self.suffix_of(id))
            .max()
            .unwrap_or(LOWEST_SUFFIX - 1);

        let mut suffix = largest_suffix.max(LOWEST_SUFFIX - 1) + 1;
        loop {
            let candidate = self.format(suffix);
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn format(&self, suffix: u32) -> String {
        format!("{}-{}", self.prefix, suffix)
    }

    fn suffix_of(&self, id: &str) -> Option<u32> {
        id.strip_prefix(self.prefix.as_str())?
            .strip_prefix('-')?
            .parse::<u32>()
            .ok()
    }
}
