use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

use crate::models::bookings::ContractNumber;

pub struct ContractNumberGenerator;

impl ContractNumberGenerator {
    /// Mint a contract number, `C-YYYYMM-NNNN`: the creation year and month
    /// followed by a zero-padded draw from [0, 9999].
    ///
    /// No uniqueness check is made against previously issued numbers —
    /// two bookings in the same month can collide. A caller that needs
    /// unique contract numbers must enforce that where bookings are stored
    /// (e.g. a unique index with retry).
    pub fn generate(now: DateTime<Utc>) -> ContractNumber {
        Self::generate_with(now, &mut rand::thread_rng())
    }

    /// [`ContractNumberGenerator::generate`] with a caller-supplied source
    /// of randomness.
    pub fn generate_with<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> ContractNumber {
        let serial: u32 = rng.gen_range(0..=9999);
        ContractNumber::new(format!("C-{}{:02}-{:04}", now.year(), now.month(), serial))
    }
}
