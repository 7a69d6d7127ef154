use crate::{
    prompts,
    workflow::{GRADE_ANSWER, GRADE_RETRIEVAL},
    TextGenerator,
};
use async_trait::async_trait;
use ragcore::{AnswerQuality, Node, NodeContext, NodeError, Relevance, StateUpdate, WorkflowState};
use std::sync::Arc;

/// Parse a yes/no grader reply. "yes" wins when both tokens appear; a
/// reply containing neither is a hard error rather than a silent negative.
fn parse_yes_no(reply: &str) -> Result<bool, NodeError> {
    let normalized = reply.to_lowercase();
    if normalized.contains("yes") {
        Ok(true)
    } else if normalized.contains("no") {
        Ok(false)
    } else {
        Err(NodeError::UnrecognizedVerdict(reply.to_string()))
    }
}

/// Retrieval grading step: asks the language capability whether the
/// current docs are relevant to the question and sets `relevance`. The
/// verdict is rewritten on every pass, so a stale value from a prior
/// iteration never survives this node.
pub struct GradeRetrievalNode {
    generator: Arc<dyn TextGenerator>,
}

impl GradeRetrievalNode {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node for GradeRetrievalNode {
    fn name(&self) -> &str {
        GRADE_RETRIEVAL
    }

    async fn run(
        &self,
        ctx: NodeContext,
        state: &WorkflowState,
    ) -> Result<StateUpdate, NodeError> {
        let reply = self
            .generator
            .complete(prompts::relevance_request(&state.question, &state.docs))
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Relevance grading failed: {}", e)))?;

        let relevance = if parse_yes_no(&reply)? {
            Relevance::Relevant
        } else {
            Relevance::Irrelevant
        };

        ctx.events.info(format!("Retrieval graded {}", relevance.as_str()));

        Ok(StateUpdate::relevance(relevance))
    }
}

/// Answer grading step: asks whether the generated answer actually
/// answers the question and sets `answer_quality`.
pub struct GradeAnswerNode {
    generator: Arc<dyn TextGenerator>,
}

impl GradeAnswerNode {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node for GradeAnswerNode {
    fn name(&self) -> &str {
        GRADE_ANSWER
    }

    async fn run(
        &self,
        ctx: NodeContext,
        state: &WorkflowState,
    ) -> Result<StateUpdate, NodeError> {
        let answer = state.answer.as_deref().unwrap_or_default();
        let reply = self
            .generator
            .complete(prompts::answer_grading_request(&state.question, answer))
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Answer grading failed: {}", e)))?;

        let quality = if parse_yes_no(&reply)? {
            AnswerQuality::Correct
        } else {
            AnswerQuality::Incorrect
        };

        ctx.events.info(format!("Answer graded {}", quality.as_str()));

        Ok(StateUpdate::answer_quality(quality))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_yes_and_no() {
        assert!(parse_yes_no("yes").unwrap());
        assert!(!parse_yes_no("no").unwrap());
    }

    #[test]
    fn parsing_is_case_insensitive_and_tolerates_prose() {
        assert!(parse_yes_no("Yes, the documents cover it.").unwrap());
        assert!(!parse_yes_no("No - unrelated material.").unwrap());
    }

    #[test]
    fn yes_wins_when_both_tokens_appear() {
        assert!(parse_yes_no("yes and no").unwrap());
    }

    #[test]
    fn unparseable_reply_is_an_error() {
        let err = parse_yes_no("maybe?").unwrap_err();
        assert!(matches!(err, NodeError::UnrecognizedVerdict(_)));
    }
}
