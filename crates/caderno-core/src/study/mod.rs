//! Study-domain models: subjects, notes, calendar events, flashcards.

pub mod calendar;
pub mod flashcard;
pub mod note;
pub mod subject;

pub use calendar::{CalendarEvent, EventDraft, EventType};
pub use flashcard::{Flashcard, FlashcardRequest};
pub use note::{Note, NoteDraft, filter_by_text};
pub use subject::{MAX_ACADEMIC_PERIOD, Subject, SubjectDraft, group_by_period, is_valid_period};
