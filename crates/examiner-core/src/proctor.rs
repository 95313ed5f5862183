//! Bookkeeping for many simultaneous exams.
//!
//! Each participant gets an independent [`Examiner`]; nothing is shared
//! between sessions. A scheduler calls [`Proctor::tick_all`] once per time
//! unit and routes incoming answers with [`Proctor::answer`]. The proctor
//! does no locking of its own; hosts that touch it from several tasks wrap
//! it in their own mutex.

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::error::ExamError;
use crate::examiner::{Examiner, TickResult};

/// Live exam sessions keyed by participant.
#[derive(Debug, Clone)]
pub struct Proctor<K> {
    sessions: BTreeMap<K, Examiner>,
}

impl<K> Default for Proctor<K> {
    fn default() -> Self {
        Self {
            sessions: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone + Display> Proctor<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session. A participant may only sit one exam at a time.
    pub fn start(&mut self, key: K, examiner: Examiner) -> Result<(), ExamError> {
        if self.sessions.contains_key(&key) {
            return Err(ExamError::SessionBusy(key.to_string()));
        }
        tracing::debug!(
            "{key} started exam '{}' (seed {})",
            examiner.exam_name(),
            examiner.seed()
        );
        self.sessions.insert(key, examiner);
        Ok(())
    }

    pub fn is_busy(&self, key: &K) -> bool {
        self.sessions.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&Examiner> {
        self.sessions.get(key)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Tick every live session once, in key order.
    pub fn tick_all(&mut self) -> Vec<(K, TickResult)> {
        self.sessions
            .iter_mut()
            .map(|(key, examiner)| (key.clone(), examiner.tick()))
            .collect()
    }

    /// Forward an answer to the participant's session.
    pub fn answer(&mut self, key: &K, text: &str) -> Result<bool, ExamError> {
        self.session_mut(key)?.answer(text)
    }

    pub fn give_up(&mut self, key: &K) -> Result<(), ExamError> {
        self.session_mut(key)?.give_up()
    }

    /// Remove and return every finished session.
    pub fn take_finished(&mut self) -> Vec<(K, Examiner)> {
        let finished: Vec<K> = self
            .sessions
            .iter()
            .filter(|(_, examiner)| examiner.finished())
            .map(|(key, _)| key.clone())
            .collect();

        finished
            .into_iter()
            .filter_map(|key| self.sessions.remove_entry(&key))
            .collect()
    }

    /// Drop a session regardless of its state.
    pub fn remove(&mut self, key: &K) -> Option<Examiner> {
        self.sessions.remove(key)
    }

    fn session_mut(&mut self, key: &K) -> Result<&mut Examiner, ExamError> {
        self.sessions
            .get_mut(key)
            .ok_or_else(|| ExamError::UnknownSession(key.to_string()))
    }
}
