//! The four prompt templates of the workflow, all served by the one
//! shared text-generation capability.

use crate::CompletionRequest;
use ragcore::ContextDoc;

/// Ask whether the retrieved documents are relevant to the question.
/// Document contents are joined with single newlines.
pub fn relevance_request(question: &str, docs: &[ContextDoc]) -> CompletionRequest {
    let joined = docs
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    CompletionRequest::new(format!("Q: {}\nDocs:\n{}", question, joined))
        .with_system("Are the docs relevant to the question? Answer yes or no.")
}

/// Ask for a version of the question that retrieves better context.
pub fn rewrite_request(question: &str) -> CompletionRequest {
    CompletionRequest::new(question)
        .with_system("Rewrite the question to retrieve better context.")
}

/// Ask for an answer grounded in the documents. Contents are joined with
/// blank lines and embedded in the system prompt.
pub fn generation_request(question: &str, docs: &[ContextDoc]) -> CompletionRequest {
    CompletionRequest::new(question).with_system(format!(
        "Use the following documents to answer the question.\n\n{}",
        format_docs(docs)
    ))
}

/// Ask whether the answer actually answers the question.
pub fn answer_grading_request(question: &str, answer: &str) -> CompletionRequest {
    CompletionRequest::new(format!("Q: {}\nA: {}", question, answer))
        .with_system("Does the answer correctly answer the question? Yes or No.")
}

/// Join document contents for the generation prompt.
pub fn format_docs(docs: &[ContextDoc]) -> String {
    docs.iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_docs_joins_with_blank_lines() {
        let docs = vec![ContextDoc::new("first"), ContextDoc::new("second")];
        assert_eq!(format_docs(&docs), "first\n\nsecond");
    }

    #[test]
    fn format_docs_empty() {
        assert_eq!(format_docs(&[]), "");
    }

    #[test]
    fn relevance_request_embeds_question_and_docs() {
        let docs = vec![ContextDoc::new("alpha"), ContextDoc::new("beta")];
        let request = relevance_request("what is alpha?", &docs);
        assert!(request.prompt.contains("Q: what is alpha?"));
        assert!(request.prompt.contains("alpha\nbeta"));
        assert!(request.system.unwrap().contains("yes or no"));
    }
}
