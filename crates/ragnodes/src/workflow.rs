//! The fixed topology of the question-answering workflow.

use crate::{
    GenerateNode, GradeAnswerNode, GradeRetrievalNode, Retriever, RewriteNode, RouterNode,
    TextGenerator, VectorstoreNode, WebSearchNode, WebSearcher,
};
use ragcore::{AnswerQuality, Relevance, RouteLabel, Target, WorkflowGraph, WorkflowState};
use std::sync::Arc;

pub const ROUTER: &str = "router";
pub const VECTORSTORE: &str = "vectorstore";
pub const GRADE_RETRIEVAL: &str = "grade_retrieval";
pub const REWRITE: &str = "rewrite";
pub const WEB_SEARCH: &str = "web_search";
pub const GENERATE: &str = "generate";
pub const GRADE_ANSWER: &str = "grade_answer";

/// The step names in execution-trace order.
pub const NODE_NAMES: [&str; 7] = [
    ROUTER,
    VECTORSTORE,
    GRADE_RETRIEVAL,
    REWRITE,
    WEB_SEARCH,
    GENERATE,
    GRADE_ANSWER,
];

/// The external capabilities the workflow consumes.
#[derive(Clone)]
pub struct Collaborators {
    pub retriever: Arc<dyn Retriever>,
    pub searcher: Arc<dyn WebSearcher>,
    pub generator: Arc<dyn TextGenerator>,
}

/// Questions mentioning "pdf" go to the index, everything else to web
/// search. Crude placeholder for a real query classifier.
pub fn route_question(state: &WorkflowState) -> RouteLabel {
    if state.question.to_lowercase().contains("pdf") {
        VECTORSTORE
    } else {
        WEB_SEARCH
    }
}

/// Anything but an explicit relevant verdict (including an unset field)
/// goes back through rewrite.
pub fn retrieval_verdict(state: &WorkflowState) -> RouteLabel {
    match state.relevance {
        Some(Relevance::Relevant) => "relevant",
        _ => "irrelevant",
    }
}

/// Anything but an explicit correct verdict goes back through rewrite.
pub fn answer_verdict(state: &WorkflowState) -> RouteLabel {
    match state.answer_quality {
        Some(AnswerQuality::Correct) => "correct",
        _ => "incorrect",
    }
}

/// Declare the workflow graph: seven nodes, two retry loops.
///
/// Rewritten questions always re-enter the vectorstore, even when the
/// original question was routed to web search. Fixed policy, not
/// configurable.
pub fn build_workflow(collaborators: Collaborators) -> WorkflowGraph {
    let Collaborators {
        retriever,
        searcher,
        generator,
    } = collaborators;

    let mut graph = WorkflowGraph::new("adaptive-rag");

    graph.add_node(Box::new(RouterNode));
    graph.add_node(Box::new(VectorstoreNode::new(retriever)));
    graph.add_node(Box::new(GradeRetrievalNode::new(generator.clone())));
    graph.add_node(Box::new(RewriteNode::new(generator.clone())));
    graph.add_node(Box::new(WebSearchNode::new(searcher)));
    graph.add_node(Box::new(GenerateNode::new(generator.clone())));
    graph.add_node(Box::new(GradeAnswerNode::new(generator)));

    graph.set_entry(ROUTER);

    graph.add_conditional_edges(
        ROUTER,
        route_question,
        vec![
            (VECTORSTORE, Target::Node(VECTORSTORE)),
            (WEB_SEARCH, Target::Node(WEB_SEARCH)),
        ],
    );

    // Vectorstore path
    graph.add_edge(VECTORSTORE, GRADE_RETRIEVAL);
    graph.add_conditional_edges(
        GRADE_RETRIEVAL,
        retrieval_verdict,
        vec![
            ("relevant", Target::Node(GENERATE)),
            ("irrelevant", Target::Node(REWRITE)),
        ],
    );
    graph.add_edge(REWRITE, VECTORSTORE);

    // Web search path
    graph.add_edge(WEB_SEARCH, GENERATE);

    // Answer grading
    graph.add_edge(GENERATE, GRADE_ANSWER);
    graph.add_conditional_edges(
        GRADE_ANSWER,
        answer_verdict,
        vec![
            ("correct", Target::End),
            ("incorrect", Target::Node(REWRITE)),
        ],
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_questions_route_to_vectorstore() {
        for question in ["What is in my pdf?", "Summarize THE PDF", "pdf"] {
            let state = WorkflowState::new(question);
            assert_eq!(route_question(&state), VECTORSTORE, "{question}");
        }
    }

    #[test]
    fn other_questions_route_to_web_search() {
        for question in ["Latest news today", "", "pd f"] {
            let state = WorkflowState::new(question);
            assert_eq!(route_question(&state), WEB_SEARCH, "{question}");
        }
    }

    #[test]
    fn only_explicit_relevant_goes_to_generate() {
        let mut state = WorkflowState::new("q");
        assert_eq!(retrieval_verdict(&state), "irrelevant");

        state.relevance = Some(Relevance::Irrelevant);
        assert_eq!(retrieval_verdict(&state), "irrelevant");

        state.relevance = Some(Relevance::Relevant);
        assert_eq!(retrieval_verdict(&state), "relevant");
    }

    #[test]
    fn only_explicit_correct_terminates() {
        let mut state = WorkflowState::new("q");
        assert_eq!(answer_verdict(&state), "incorrect");

        state.answer_quality = Some(AnswerQuality::Incorrect);
        assert_eq!(answer_verdict(&state), "incorrect");

        state.answer_quality = Some(AnswerQuality::Correct);
        assert_eq!(answer_verdict(&state), "correct");
    }
}
