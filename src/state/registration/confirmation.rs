//! Success page: confirmation details and the celebration schedule.

use std::time::Duration;

use rand::Rng;

use super::{RegistrationSubject, SubjectRef};
use crate::routes::Route;

/// Display id for a confirmed registration, e.g. `#EV12023417`.
#[must_use]
pub fn registration_id(subject_id: i64, suffix: u16) -> String {
    format!("#EV{subject_id}2023{suffix}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    subject: RegistrationSubject,
    registration_id: String,
}

impl Confirmation {
    /// Resolve the subject for `/registration-success/{id}` and issue a
    /// registration id.
    ///
    /// # Errors
    ///
    /// Returns [`Route::Events`] when no subject matches.
    pub fn resolve(subject: SubjectRef, subjects: &[RegistrationSubject]) -> Result<Self, Route> {
        Self::resolve_with(subject, subjects, &mut rand::rng())
    }

    /// Like [`Confirmation::resolve`] with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns [`Route::Events`] when no subject matches.
    pub fn resolve_with<R: Rng + ?Sized>(
        subject: SubjectRef,
        subjects: &[RegistrationSubject],
        rng: &mut R,
    ) -> Result<Self, Route> {
        let subject = super::find_subject(subjects, subject).ok_or(Route::Events)?;
        let registration_id = registration_id(subject.id, rng.random_range(0..1000));
        Ok(Self { subject, registration_id })
    }

    #[must_use]
    pub fn subject(&self) -> &RegistrationSubject {
        &self.subject
    }

    #[must_use]
    pub fn registration_id(&self) -> &str {
        &self.registration_id
    }
}

// =============================================================================
// CELEBRATION
// =============================================================================

/// Confetti bursts on a fixed interval, shrinking as time runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Celebration {
    pub duration: Duration,
    pub interval: Duration,
    pub max_particles: u32,
}

impl Default for Celebration {
    fn default() -> Self {
        Self { duration: Duration::from_secs(3), interval: Duration::from_millis(250), max_particles: 50 }
    }
}

impl Celebration {
    /// Particles for a burst with `remaining` time left; zero once over.
    #[must_use]
    pub fn particle_count(&self, remaining: Duration) -> u32 {
        let total = self.duration.as_millis();
        if total == 0 || remaining.is_zero() {
            return 0;
        }
        let remaining = remaining.min(self.duration).as_millis();
        u32::try_from(u128::from(self.max_particles) * remaining / total).unwrap_or(self.max_particles)
    }

    /// `(elapsed, particles)` for every burst, in order.
    #[must_use]
    pub fn schedule(&self) -> Vec<(Duration, u32)> {
        if self.interval.is_zero() {
            return Vec::new();
        }
        let mut bursts = Vec::new();
        let mut elapsed = self.interval;
        while elapsed < self.duration {
            bursts.push((elapsed, self.particle_count(self.duration - elapsed)));
            elapsed += self.interval;
        }
        bursts
    }

    /// Fire `burst` on schedule. Dropping the future stops the animation.
    pub async fn play(&self, mut burst: impl FnMut(u32)) {
        let mut last = Duration::ZERO;
        for (at, particles) in self.schedule() {
            tokio::time::sleep(at - last).await;
            last = at;
            burst(particles);
        }
    }
}
