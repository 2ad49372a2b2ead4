use serde::{Deserialize, Serialize};

/// Kind of interview question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Technical,
    Behavioral,
    Situational,
}

/// A single interview question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier (e.g., "q1")
    pub id: String,

    /// Prompt text spoken by the interviewer
    pub prompt: String,

    pub kind: QuestionKind,

    /// Category label shown next to the question (e.g., "Problem Solving")
    pub category: String,

    /// Expected answer duration in seconds
    pub expected_duration_secs: u32,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        kind: QuestionKind,
        category: impl Into<String>,
        expected_duration_secs: u32,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind,
            category: category.into(),
            expected_duration_secs,
        }
    }
}

/// Which part of the bank a question belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    /// Answered by typing
    Text,
    /// Answered on camera
    Video,
}

/// Ordered, immutable question bank partitioned into text and video subsets
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    text_count: usize,
}

impl QuestionBank {
    /// Create a bank where the first `text_count` questions are answered in
    /// writing and the remainder on video.
    ///
    /// `text_count` is clamped to the number of questions.
    pub fn new(questions: Vec<Question>, text_count: usize) -> Self {
        let text_count = text_count.min(questions.len());
        Self {
            questions,
            text_count,
        }
    }

    /// Keep only the first `limit` questions, then split as in [`QuestionBank::new`].
    pub fn with_limit(mut questions: Vec<Question>, limit: usize, text_count: usize) -> Self {
        questions.truncate(limit);
        Self::new(questions, text_count)
    }

    pub fn subset(&self, subset: Subset) -> &[Question] {
        match subset {
            Subset::Text => &self.questions[..self.text_count],
            Subset::Video => &self.questions[self.text_count..],
        }
    }

    /// Question at `index` within `subset`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Callers only ask for indices they
    /// have already bounded by [`QuestionBank::len_of`].
    pub fn question(&self, subset: Subset, index: usize) -> &Question {
        &self.subset(subset)[index]
    }

    pub fn len_of(&self, subset: Subset) -> usize {
        self.subset(subset).len()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Rough interview length shown on the intro screen: two minutes per question
    pub fn estimated_minutes(&self) -> usize {
        self.questions.len() * 2
    }
}
