//! Typed corpus samples, one struct per benchmark

use serde::{Deserialize, Serialize};

/// Grade-school math word problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gsm8kSample {
    pub question: String,
    /// Worked solution ending in `#### <number>`
    pub answer: String,
}

/// Competition math problem with a `\boxed{}` solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathSample {
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, rename = "type")]
    pub problem_type: Option<String>,
}

/// Multiple-choice question; `answer` indexes into `choices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MmluSample {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: usize,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Function-synthesis task checked by executing `test`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanEvalSample {
    pub task_id: String,
    pub prompt: String,
    pub test: String,
    pub entry_point: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_type_field() {
        let sample: MathSample = serde_json::from_str(
            r#"{"problem":"1+1","solution":"\\boxed{2}","level":"Level 1","type":"Algebra"}"#,
        )
        .unwrap();
        assert_eq!(sample.problem_type.as_deref(), Some("Algebra"));
    }

    #[test]
    fn test_mmlu_optional_subject() {
        let sample: MmluSample =
            serde_json::from_str(r#"{"question":"q","choices":["a","b"],"answer":1}"#).unwrap();
        assert_eq!(sample.subject, None);
        assert_eq!(sample.answer, 1);
    }
}
