use serde::{Deserialize, Serialize};

/// One unit of retrieved context: an indexed document chunk or a web
/// search snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDoc {
    pub content: String,
    pub source: Option<String>,
}

impl ContextDoc {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Verdict produced by the retrieval grading step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Relevant,
    Irrelevant,
}

impl Relevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::Relevant => "relevant",
            Relevance::Irrelevant => "irrelevant",
        }
    }
}

/// Verdict produced by the answer grading step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerQuality {
    Correct,
    Incorrect,
}

impl AnswerQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerQuality::Correct => "correct",
            AnswerQuality::Incorrect => "incorrect",
        }
    }
}

/// The shared record threaded through every step of one run.
///
/// Created when a run starts, owned by the interpreter for the duration
/// of the run, returned to the caller on success. No cross-run identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Current query text. Replaced by the rewrite step.
    pub question: String,

    /// Retrieved context. Replaced wholesale by retrieval steps, never
    /// appended to.
    pub docs: Vec<ContextDoc>,

    /// Generated answer, set once per generation attempt.
    pub answer: Option<String>,

    /// Last relevance verdict. Overwritten on every pass through the
    /// retrieval grading step.
    pub relevance: Option<Relevance>,

    /// Last answer-quality verdict, analogous lifecycle.
    pub answer_quality: Option<AnswerQuality>,
}

impl WorkflowState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            docs: Vec::new(),
            answer: None,
            relevance: None,
            answer_quality: None,
        }
    }

    /// Merge a partial update into the state. Fields the update does not
    /// set are left untouched.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(question) = update.question {
            self.question = question;
        }
        if let Some(docs) = update.docs {
            self.docs = docs;
        }
        if let Some(answer) = update.answer {
            self.answer = Some(answer);
        }
        if let Some(relevance) = update.relevance {
            self.relevance = Some(relevance);
        }
        if let Some(answer_quality) = update.answer_quality {
            self.answer_quality = Some(answer_quality);
        }
    }
}

/// Partial update returned by a node. Unset fields pass through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub question: Option<String>,
    pub docs: Option<Vec<ContextDoc>>,
    pub answer: Option<String>,
    pub relevance: Option<Relevance>,
    pub answer_quality: Option<AnswerQuality>,
}

impl StateUpdate {
    /// An update that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Self::default()
        }
    }

    pub fn docs(docs: Vec<ContextDoc>) -> Self {
        Self {
            docs: Some(docs),
            ..Self::default()
        }
    }

    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            ..Self::default()
        }
    }

    pub fn relevance(relevance: Relevance) -> Self {
        Self {
            relevance: Some(relevance),
            ..Self::default()
        }
    }

    pub fn answer_quality(answer_quality: AnswerQuality) -> Self {
        Self {
            answer_quality: Some(answer_quality),
            ..Self::default()
        }
    }
}
