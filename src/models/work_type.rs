use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Closed vocabulary of work types recognized by the ORCID registry
///
/// Covers the v3.0 vocabulary plus the deprecated v2 entries the registry
/// still serves for old records. Two sentinels close the set: [`Other`]
/// is the registry's own catch-all, [`Unsupported`] is this crate's
/// fallback for any raw string outside the vocabulary. Raw registry
/// strings never flow into fields typed as `WorkType`; they are funneled
/// through [`WorkType::parse_lenient`] first.
///
/// [`Other`]: WorkType::Other
/// [`Unsupported`]: WorkType::Unsupported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkType {
    Annotation,
    ArtisticPerformance,
    Book,
    BookChapter,
    BookReview,
    ConferenceAbstract,
    ConferencePaper,
    ConferencePoster,
    DataManagementPlan,
    DataSet,
    DictionaryEntry,
    Disclosure,
    /// Deprecated alias kept for records created against the v2 API
    Dissertation,
    DissertationThesis,
    EditedBook,
    EncyclopediaEntry,
    Invention,
    JournalArticle,
    JournalIssue,
    LectureSpeech,
    License,
    MagazineArticle,
    Manual,
    NewsletterArticle,
    NewspaperArticle,
    OnlineResource,
    Patent,
    PhysicalObject,
    Preprint,
    RegisteredCopyright,
    Report,
    ResearchTechnique,
    ResearchTool,
    Software,
    SpinOffCompany,
    StandardsAndPolicy,
    SupervisedStudentPublication,
    TechnicalStandard,
    Test,
    Trademark,
    Translation,
    /// Deprecated alias kept for records created against the v2 API
    Undefined,
    Website,
    WorkingPaper,
    /// Registry catch-all for works that fit no other category
    Other,
    /// Fallback for raw values outside the closed vocabulary
    Unsupported,
}

/// All vocabulary members, in declaration order.
pub const ALL_WORK_TYPES: &[WorkType] = &[
    WorkType::Annotation,
    WorkType::ArtisticPerformance,
    WorkType::Book,
    WorkType::BookChapter,
    WorkType::BookReview,
    WorkType::ConferenceAbstract,
    WorkType::ConferencePaper,
    WorkType::ConferencePoster,
    WorkType::DataManagementPlan,
    WorkType::DataSet,
    WorkType::DictionaryEntry,
    WorkType::Disclosure,
    WorkType::Dissertation,
    WorkType::DissertationThesis,
    WorkType::EditedBook,
    WorkType::EncyclopediaEntry,
    WorkType::Invention,
    WorkType::JournalArticle,
    WorkType::JournalIssue,
    WorkType::LectureSpeech,
    WorkType::License,
    WorkType::MagazineArticle,
    WorkType::Manual,
    WorkType::NewsletterArticle,
    WorkType::NewspaperArticle,
    WorkType::OnlineResource,
    WorkType::Patent,
    WorkType::PhysicalObject,
    WorkType::Preprint,
    WorkType::RegisteredCopyright,
    WorkType::Report,
    WorkType::ResearchTechnique,
    WorkType::ResearchTool,
    WorkType::Software,
    WorkType::SpinOffCompany,
    WorkType::StandardsAndPolicy,
    WorkType::SupervisedStudentPublication,
    WorkType::TechnicalStandard,
    WorkType::Test,
    WorkType::Trademark,
    WorkType::Translation,
    WorkType::Undefined,
    WorkType::Website,
    WorkType::WorkingPaper,
    WorkType::Other,
    WorkType::Unsupported,
];

impl WorkType {
    /// The fixed lowercase hyphenated value the registry uses on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annotation => "annotation",
            Self::ArtisticPerformance => "artistic-performance",
            Self::Book => "book",
            Self::BookChapter => "book-chapter",
            Self::BookReview => "book-review",
            Self::ConferenceAbstract => "conference-abstract",
            Self::ConferencePaper => "conference-paper",
            Self::ConferencePoster => "conference-poster",
            Self::DataManagementPlan => "data-management-plan",
            Self::DataSet => "data-set",
            Self::DictionaryEntry => "dictionary-entry",
            Self::Disclosure => "disclosure",
            Self::Dissertation => "dissertation",
            Self::DissertationThesis => "dissertation-thesis",
            Self::EditedBook => "edited-book",
            Self::EncyclopediaEntry => "encyclopedia-entry",
            Self::Invention => "invention",
            Self::JournalArticle => "journal-article",
            Self::JournalIssue => "journal-issue",
            Self::LectureSpeech => "lecture-speech",
            Self::License => "license",
            Self::MagazineArticle => "magazine-article",
            Self::Manual => "manual",
            Self::NewsletterArticle => "newsletter-article",
            Self::NewspaperArticle => "newspaper-article",
            Self::OnlineResource => "online-resource",
            Self::Patent => "patent",
            Self::PhysicalObject => "physical-object",
            Self::Preprint => "preprint",
            Self::RegisteredCopyright => "registered-copyright",
            Self::Report => "report",
            Self::ResearchTechnique => "research-technique",
            Self::ResearchTool => "research-tool",
            Self::Software => "software",
            Self::SpinOffCompany => "spin-off-company",
            Self::StandardsAndPolicy => "standards-and-policy",
            Self::SupervisedStudentPublication => "supervised-student-publication",
            Self::TechnicalStandard => "technical-standard",
            Self::Test => "test",
            Self::Trademark => "trademark",
            Self::Translation => "translation",
            Self::Undefined => "undefined",
            Self::Website => "website",
            Self::WorkingPaper => "working-paper",
            Self::Other => "other",
            Self::Unsupported => "unsupported",
        }
    }

    /// The uppercase underscored name form, accepted by lenient parsing
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Annotation => "ANNOTATION",
            Self::ArtisticPerformance => "ARTISTIC_PERFORMANCE",
            Self::Book => "BOOK",
            Self::BookChapter => "BOOK_CHAPTER",
            Self::BookReview => "BOOK_REVIEW",
            Self::ConferenceAbstract => "CONFERENCE_ABSTRACT",
            Self::ConferencePaper => "CONFERENCE_PAPER",
            Self::ConferencePoster => "CONFERENCE_POSTER",
            Self::DataManagementPlan => "DATA_MANAGEMENT_PLAN",
            Self::DataSet => "DATA_SET",
            Self::DictionaryEntry => "DICTIONARY_ENTRY",
            Self::Disclosure => "DISCLOSURE",
            Self::Dissertation => "DISSERTATION",
            Self::DissertationThesis => "DISSERTATION_THESIS",
            Self::EditedBook => "EDITED_BOOK",
            Self::EncyclopediaEntry => "ENCYCLOPEDIA_ENTRY",
            Self::Invention => "INVENTION",
            Self::JournalArticle => "JOURNAL_ARTICLE",
            Self::JournalIssue => "JOURNAL_ISSUE",
            Self::LectureSpeech => "LECTURE_SPEECH",
            Self::License => "LICENSE",
            Self::MagazineArticle => "MAGAZINE_ARTICLE",
            Self::Manual => "MANUAL",
            Self::NewsletterArticle => "NEWSLETTER_ARTICLE",
            Self::NewspaperArticle => "NEWSPAPER_ARTICLE",
            Self::OnlineResource => "ONLINE_RESOURCE",
            Self::Patent => "PATENT",
            Self::PhysicalObject => "PHYSICAL_OBJECT",
            Self::Preprint => "PREPRINT",
            Self::RegisteredCopyright => "REGISTERED_COPYRIGHT",
            Self::Report => "REPORT",
            Self::ResearchTechnique => "RESEARCH_TECHNIQUE",
            Self::ResearchTool => "RESEARCH_TOOL",
            Self::Software => "SOFTWARE",
            Self::SpinOffCompany => "SPIN_OFF_COMPANY",
            Self::StandardsAndPolicy => "STANDARDS_AND_POLICY",
            Self::SupervisedStudentPublication => "SUPERVISED_STUDENT_PUBLICATION",
            Self::TechnicalStandard => "TECHNICAL_STANDARD",
            Self::Test => "TEST",
            Self::Trademark => "TRADEMARK",
            Self::Translation => "TRANSLATION",
            Self::Undefined => "UNDEFINED",
            Self::Website => "WEBSITE",
            Self::WorkingPaper => "WORKING_PAPER",
            Self::Other => "OTHER",
            Self::Unsupported => "UNSUPPORTED",
        }
    }

    /// Human-readable label: the first hyphen becomes a space and only
    /// the first letter is capitalized ("journal-article" becomes
    /// "Journal article", "supervised-student-publication" keeps its
    /// remaining hyphens).
    #[must_use]
    pub fn label(self) -> String {
        let value = self.as_str().replacen('-', " ", 1);
        let mut chars = value.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => value,
        }
    }

    /// Lenient two-stage parse, never fails
    ///
    /// Stage one normalizes the trimmed input to name form (uppercase,
    /// whitespace runs collapsed to a single underscore) and looks it up
    /// as a vocabulary name, so "journal article", "Journal  Article" and
    /// "JOURNAL_ARTICLE" all resolve. Stage two compares the trimmed
    /// input against the wire values directly, so "journal-article"
    /// resolves too. Anything else is [`WorkType::Unsupported`].
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim();

        let name_form = trimmed
            .to_uppercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        if let Some(found) = ALL_WORK_TYPES.iter().find(|t| t.name() == name_form) {
            return *found;
        }

        ALL_WORK_TYPES
            .iter()
            .find(|t| t.as_str() == trimmed)
            .copied()
            .unwrap_or(Self::Unsupported)
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for WorkType {
    fn from(s: &str) -> Self {
        Self::parse_lenient(s)
    }
}

impl Serialize for WorkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WorkTypeVisitor;

        impl Visitor<'_> for WorkTypeVisitor {
            type Value = WorkType;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a work type string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<WorkType, E> {
                Ok(WorkType::parse_lenient(v))
            }
        }

        deserializer.deserialize_str(WorkTypeVisitor)
    }
}
