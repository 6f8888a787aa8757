//! Fallback profile generator
//!
//! Produces schema-valid synthetic profiles when live collection is unavailable or
//! under-delivers, followed by a fixed tail of records each cleaning gate should reject.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::info;

use crate::constants::PROFILE_PATH_PREFIX;
use crate::types::{RawProfile, RoleType};

pub const FIRST_NAMES: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella", "William",
    "Mia", "James", "Charlotte", "Benjamin", "Amelia", "Lucas", "Harper", "Henry", "Evelyn",
    "Alexander", "Abigail", "Michael", "Emily", "Daniel", "Elizabeth", "Matthew", "Sofia",
    "David", "Avery", "Joseph", "Ella", "Carter", "Scarlett", "Owen", "Grace", "Wyatt", "Chloe",
    "Sebastian", "Victoria", "Jack", "Madison", "Luke", "Aria", "Nathan", "Hannah", "Caleb",
    "Addison", "Isaac", "Natalie", "Gabriel", "Lily",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis", "Robinson",
    "Walker", "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores",
    "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell", "Mitchell", "Carter",
    "Roberts", "Phillips", "Evans", "Turner",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "outlook.com",
    "yahoo.com",
    "protonmail.com",
    "icloud.com",
];

/// Number of intentionally invalid records appended to every generated batch
pub const INVALID_TAIL_LEN: usize = 4;

// Upper bound on up-front allocation; larger batches grow as they are filled
const MAX_PREALLOCATED: usize = 10_000;

/// Synthetic profile factory. Randomness is injected so a seeded generator is reproducible.
pub struct FallbackGenerator<R = StdRng> {
    rng: R,
}

impl FallbackGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> FallbackGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `count` valid profiles followed by the invalid tail
    pub fn generate(&mut self, role: RoleType, count: usize) -> Vec<RawProfile> {
        info!(
            "Generating fallback data for {} (count={})",
            role.key(),
            count
        );
        let mut profiles = self.generate_valid(role, count);
        profiles.extend(invalid_tail(role));
        profiles
    }

    pub fn generate_valid(&mut self, role: RoleType, count: usize) -> Vec<RawProfile> {
        let capacity = count.min(MAX_PREALLOCATED);
        let mut profiles = Vec::with_capacity(capacity.saturating_add(INVALID_TAIL_LEN));
        let mut used_emails: HashSet<String> = HashSet::with_capacity(capacity);

        for i in 0..count {
            let first = self.pick(FIRST_NAMES);
            let last = self.pick(LAST_NAMES);
            let domain = self.pick(EMAIL_DOMAINS);

            let first_lower = first.to_lowercase();
            let last_lower = last.to_lowercase();
            let email_base = format!("{first_lower}.{last_lower}");

            let mut email = format!("{email_base}@{domain}");
            let mut counter = 1;
            while used_emails.contains(&email) {
                email = format!("{email_base}{counter}@{domain}");
                counter += 1;
            }
            used_emails.insert(email.clone());

            let profile_id = i + 1 + role.profile_id_offset();
            let profile_link = format!(
                "{PROFILE_PATH_PREFIX}{first_lower}-{last_lower}-{}-{profile_id}",
                role.slug_suffix()
            );

            profiles.push(RawProfile::new(
                format!("{first} {last}"),
                email,
                profile_link,
                role.label(),
            ));
        }

        profiles
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        // Pools are non-empty constants
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

/// Records each aimed at one rejection path: brand name, "The X" name, test data, example domain
pub fn invalid_tail(role: RoleType) -> Vec<RawProfile> {
    let label = role.label();
    vec![
        RawProfile::new(
            "Creative Media Studio",
            "contact@studio.com",
            "https://www.twine.net/profile/studio-1",
            label,
        ),
        RawProfile::new(
            "The Agency Group",
            "info@agency.com",
            "https://www.twine.net/profile/agency-2",
            label,
        ),
        RawProfile::new(
            "Test User",
            "test@test.com",
            "https://www.twine.net/profile/test-3",
            label,
        ),
        RawProfile::new(
            "Sample Name",
            "example@example.com",
            "https://www.twine.net/profile/sample-4",
            label,
        ),
    ]
}
