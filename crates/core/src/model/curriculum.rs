use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::WeekId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error("track id cannot be empty")]
    EmptyTrackId,

    #[error("track title cannot be empty")]
    EmptyTrackTitle,

    #[error("week id cannot be empty")]
    EmptyWeekId,

    #[error("week title cannot be empty for week {id}")]
    EmptyWeekTitle { id: WeekId },

    #[error("week {id} ends ({end}) before it starts ({start})")]
    InvalidDateRange {
        id: WeekId,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("week id {id} appears more than once in the curriculum")]
    DuplicateWeekId { id: WeekId },

    #[error("curriculum document is malformed: {0}")]
    Malformed(String),
}

//
// ─── WEEK ──────────────────────────────────────────────────────────────────────
//

/// The atomic planning unit of the roadmap.
///
/// A week carries a fixed, ordered goal list; the goal count is the
/// denominator for partial-progress percentages. The `[start_date, end_date]`
/// interval (inclusive on both ends) positions the week relative to "now"
/// for current-week detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeekDoc")]
pub struct Week {
    id: WeekId,
    title: String,
    goals: Vec<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
struct WeekDoc {
    id: WeekId,
    title: String,
    goals: Vec<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<WeekDoc> for Week {
    type Error = CurriculumError;

    fn try_from(doc: WeekDoc) -> Result<Self, Self::Error> {
        Week::new(doc.id, doc.title, doc.goals, doc.start_date, doc.end_date)
    }
}

impl Week {
    /// Creates a new week.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` if the id or title is blank, or if
    /// `end_date` precedes `start_date`.
    pub fn new(
        id: WeekId,
        title: impl Into<String>,
        goals: Vec<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, CurriculumError> {
        if id.is_blank() {
            return Err(CurriculumError::EmptyWeekId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CurriculumError::EmptyWeekTitle { id });
        }
        if end_date < start_date {
            return Err(CurriculumError::InvalidDateRange {
                id,
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            goals,
            start_date,
            end_date,
        })
    }

    #[must_use]
    pub fn id(&self) -> &WeekId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    /// Number of goals; the denominator for the partial-progress percentage.
    #[must_use]
    pub fn goal_count(&self) -> usize {
        self.goals.len()
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns true if `date` falls inside this week's inclusive date range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

//
// ─── MONTH / TRACK ─────────────────────────────────────────────────────────────
//

/// A month of the roadmap, owning its weeks in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    title: String,
    weeks: Vec<Week>,
}

impl Month {
    #[must_use]
    pub fn new(title: impl Into<String>, weeks: Vec<Week>) -> Self {
        Self {
            title: title.into(),
            weeks,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }
}

/// A top-level curriculum division (e.g. a subject area), owning its months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrackDoc")]
pub struct Track {
    id: String,
    title: String,
    months: Vec<Month>,
}

#[derive(Deserialize)]
struct TrackDoc {
    id: String,
    title: String,
    months: Vec<Month>,
}

impl TryFrom<TrackDoc> for Track {
    type Error = CurriculumError;

    fn try_from(doc: TrackDoc) -> Result<Self, Self::Error> {
        Track::new(doc.id, doc.title, doc.months)
    }
}

impl Track {
    /// Creates a new track.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` if the id or title is blank.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        months: Vec<Month>,
    ) -> Result<Self, CurriculumError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CurriculumError::EmptyTrackId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CurriculumError::EmptyTrackTitle);
        }
        Ok(Self {
            id: id.trim().to_owned(),
            title: title.trim().to_owned(),
            months,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn months(&self) -> &[Month] {
        &self.months
    }
}

//
// ─── CURRICULUM ────────────────────────────────────────────────────────────────
//

/// The full Track → Month → Week tree, immutable for the session lifetime.
///
/// Construction enforces that week ids are unique across the entire tree;
/// every later join (completion records, goal cache) relies on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurriculumDoc")]
pub struct Curriculum {
    tracks: Vec<Track>,
}

/// Raw serde shape; converted through the validating constructor.
#[derive(Deserialize)]
struct CurriculumDoc {
    tracks: Vec<Track>,
}

impl TryFrom<CurriculumDoc> for Curriculum {
    type Error = CurriculumError;

    fn try_from(doc: CurriculumDoc) -> Result<Self, Self::Error> {
        Curriculum::new(doc.tracks)
    }
}

impl Curriculum {
    /// Builds a curriculum from its tracks, validating global week-id
    /// uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::DuplicateWeekId` if two weeks anywhere in
    /// the tree share an id.
    pub fn new(tracks: Vec<Track>) -> Result<Self, CurriculumError> {
        let mut seen = std::collections::HashSet::new();
        for track in &tracks {
            for month in track.months() {
                for week in month.weeks() {
                    if !seen.insert(week.id().clone()) {
                        return Err(CurriculumError::DuplicateWeekId {
                            id: week.id().clone(),
                        });
                    }
                }
            }
        }
        Ok(Self { tracks })
    }

    /// Parses and validates a curriculum from its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::Malformed` for parse failures and the usual
    /// validation errors for structurally valid but inconsistent documents.
    pub fn from_json(json: &str) -> Result<Self, CurriculumError> {
        serde_json::from_str(json).map_err(|e| CurriculumError::Malformed(e.to_string()))
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterates all weeks in curriculum order (track, then month, then week).
    pub fn weeks(&self) -> impl Iterator<Item = &Week> {
        self.tracks
            .iter()
            .flat_map(|t| t.months())
            .flat_map(|m| m.weeks())
    }

    /// Total number of weeks across all tracks.
    #[must_use]
    pub fn total_weeks(&self) -> usize {
        self.weeks().count()
    }

    /// Looks a week up by id. Linear scan; curricula are order-tens of weeks.
    #[must_use]
    pub fn find_week(&self, id: &WeekId) -> Option<&Week> {
        self.weeks().find(|w| w.id() == id)
    }

    /// The chronologically last week in curriculum order, if any.
    #[must_use]
    pub fn last_week(&self) -> Option<&Week> {
        self.weeks().last()
    }

    /// The program end date: the end of the last week of the last month of
    /// the last track.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.last_week().map(Week::end_date)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
