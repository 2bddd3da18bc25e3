//! Day progress: which subjects are done today, and the end-of-day sticker.
//!
//! The engine has no clock — the host shell reports the calendar date, and
//! every "today" query filters completions by that stamp. Progress survives
//! restarts as a JSON blob the host stores and hands back at init.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The thirteen locker subjects, in locker display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Reading,
    Math,
    Science,
    SocialStudies,
    Feelings,
    Writing,
    Art,
    Music,
    Shapes,
    Health,
    Pe,
    LifeSkills,
    StudyHall,
}

impl Subject {
    pub const ALL: [Subject; 13] = [
        Subject::Reading,
        Subject::Math,
        Subject::Science,
        Subject::SocialStudies,
        Subject::Feelings,
        Subject::Writing,
        Subject::Art,
        Subject::Music,
        Subject::Shapes,
        Subject::Health,
        Subject::Pe,
        Subject::LifeSkills,
        Subject::StudyHall,
    ];

    /// Stable index used on the wire (widget values, event payloads).
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).expect("in ALL")
    }

    pub fn from_index(index: usize) -> Option<Subject> {
        Self::ALL.get(index).copied()
    }

    /// Locker book title.
    pub fn title(self) -> &'static str {
        match self {
            Subject::Reading => "Reading",
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::SocialStudies => "Social Studies",
            Subject::Feelings => "Feelings",
            Subject::Writing => "Writing",
            Subject::Art => "Art",
            Subject::Music => "Music",
            Subject::Shapes => "Shapes",
            Subject::Health => "Health",
            Subject::Pe => "P.E.",
            Subject::LifeSkills => "Life Skills",
            Subject::StudyHall => "Study Hall",
        }
    }
}

/// A calendar date supplied by the host (the engine never reads a clock).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DayStamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DayStamp {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

/// Per-subject completion record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub completed: bool,
    pub last_completed: Option<DayStamp>,
}

/// The whole persisted progress state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayProgress {
    subjects: HashMap<Subject, SubjectRecord>,
    day_completed: bool,
    sticker: Option<String>,
    completed_date: Option<DayStamp>,
    /// Today's date as last reported by the host. Not persisted — the host
    /// reports it again on every launch.
    #[serde(skip)]
    today: DayStamp,
}

impl DayProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the host-reported date. Nothing is erased on rollover;
    /// yesterday's completions simply stop matching "today".
    pub fn set_today(&mut self, stamp: DayStamp) {
        self.today = stamp;
    }

    pub fn today(&self) -> DayStamp {
        self.today
    }

    /// Mark a subject finished today.
    pub fn complete_subject(&mut self, subject: Subject) {
        let record = self.subjects.entry(subject).or_default();
        record.completed = true;
        record.last_completed = Some(self.today);
    }

    /// Whether a subject was finished today (not just some day).
    pub fn is_completed_today(&self, subject: Subject) -> bool {
        self.subjects
            .get(&subject)
            .map(|r| r.completed && r.last_completed == Some(self.today))
            .unwrap_or(false)
    }

    /// Subjects finished today, in locker order.
    pub fn completed_today(&self) -> Vec<Subject> {
        Subject::ALL
            .iter()
            .copied()
            .filter(|&s| self.is_completed_today(s))
            .collect()
    }

    /// Whether every subject is finished today.
    pub fn is_all_complete(&self) -> bool {
        Subject::ALL.iter().all(|&s| self.is_completed_today(s))
    }

    /// Close out the day with the chosen sticker.
    pub fn complete_day_with_sticker(&mut self, sticker: impl Into<String>) {
        self.day_completed = true;
        self.sticker = Some(sticker.into());
        self.completed_date = Some(self.today);
    }

    /// The sticker earned on the current day, if any.
    pub fn todays_sticker(&self) -> Option<&str> {
        if self.day_completed && self.completed_date == Some(self.today) {
            self.sticker.as_deref()
        } else {
            None
        }
    }

    /// Wipe everything (parental reset).
    pub fn reset(&mut self) {
        let today = self.today;
        *self = Self::default();
        self.today = today;
    }

    // ---- Persistence ----

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored blob, keeping the current host-reported date.
    pub fn from_json(blob: &str, today: DayStamp) -> Result<Self, serde_json::Error> {
        let mut progress: DayProgress = serde_json::from_str(blob)?;
        progress.today = today;
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: DayStamp = DayStamp {
        year: 2026,
        month: 3,
        day: 9,
    };

    fn fresh() -> DayProgress {
        let mut p = DayProgress::new();
        p.set_today(TODAY);
        p
    }

    #[test]
    fn complete_subject_counts_today_only() {
        let mut p = fresh();
        p.complete_subject(Subject::Math);
        assert!(p.is_completed_today(Subject::Math));
        assert_eq!(p.completed_today(), vec![Subject::Math]);

        // Next morning the checkmark is gone, the record remains.
        p.set_today(DayStamp::new(2026, 3, 10));
        assert!(!p.is_completed_today(Subject::Math));
        assert!(p.completed_today().is_empty());
    }

    #[test]
    fn all_complete_needs_all_thirteen() {
        let mut p = fresh();
        for &s in &Subject::ALL[..12] {
            p.complete_subject(s);
        }
        assert!(!p.is_all_complete());
        p.complete_subject(Subject::StudyHall);
        assert!(p.is_all_complete());
    }

    #[test]
    fn sticker_belongs_to_its_day() {
        let mut p = fresh();
        p.complete_day_with_sticker("🌟");
        assert_eq!(p.todays_sticker(), Some("🌟"));
        p.set_today(DayStamp::new(2026, 3, 10));
        assert_eq!(p.todays_sticker(), None);
    }

    #[test]
    fn json_round_trip_preserves_records() {
        let mut p = fresh();
        p.complete_subject(Subject::Writing);
        p.complete_day_with_sticker("🏆");

        let blob = p.to_json().unwrap();
        let restored = DayProgress::from_json(&blob, TODAY).unwrap();
        assert!(restored.is_completed_today(Subject::Writing));
        assert_eq!(restored.todays_sticker(), Some("🏆"));
    }

    #[test]
    fn malformed_blob_is_an_error_not_a_panic() {
        assert!(DayProgress::from_json("not json at all", TODAY).is_err());
    }

    #[test]
    fn reset_wipes_but_keeps_today() {
        let mut p = fresh();
        p.complete_subject(Subject::Art);
        p.reset();
        assert!(p.completed_today().is_empty());
        assert_eq!(p.today(), TODAY);
    }

    #[test]
    fn subject_indices_round_trip() {
        for (i, &s) in Subject::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Subject::from_index(i), Some(s));
        }
        assert_eq!(Subject::from_index(13), None);
    }
}
