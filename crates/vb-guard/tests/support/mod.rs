//! Scripted authenticator shared by the guard integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use vb_core::enums::UnavailablePolicy;
use vb_guard::{Authenticator, ChallengeOutcome, ChallengePrompt, GuardError, SecurityContext};

/// Scripted challenge result.
pub enum Step {
    Pass,
    Fail(&'static str),
    Error(&'static str),
}

#[derive(Clone)]
pub struct Scripted {
    pub hardware: Result<bool, &'static str>,
    pub enrolled: bool,
    steps: Arc<Mutex<VecDeque<Step>>>,
    challenges: Arc<AtomicUsize>,
}

impl Scripted {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            hardware: Ok(true),
            enrolled: true,
            steps: Arc::new(Mutex::new(steps.into())),
            challenges: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn without_enrollment(mut self) -> Self {
        self.enrolled = false;
        self
    }

    pub fn with_hardware(mut self, hardware: Result<bool, &'static str>) -> Self {
        self.hardware = hardware;
        self
    }

    /// Shared counter; stays valid after the authenticator moves into a guard.
    pub fn challenge_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.challenges)
    }
}

impl Authenticator for Scripted {
    async fn has_hardware(&self) -> Result<bool, GuardError> {
        self.hardware.map_err(|e| GuardError::Platform(e.to_string()))
    }

    async fn is_enrolled(&self) -> Result<bool, GuardError> {
        Ok(self.enrolled)
    }

    async fn challenge(&self, _: &str, _: &str) -> Result<ChallengeOutcome, GuardError> {
        self.challenges.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Pass) => Ok(ChallengeOutcome::success()),
            Some(Step::Fail(reason)) => Ok(ChallengeOutcome::failure(reason)),
            Some(Step::Error(reason)) => Err(GuardError::Platform(reason.to_string())),
            None => Err(GuardError::Other("challenge script exhausted".into())),
        }
    }
}

pub fn guard(auth: Scripted, policy: UnavailablePolicy, enabled: bool) -> SecurityContext<Scripted> {
    SecurityContext::new(auth, policy, ChallengePrompt::default(), enabled)
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
