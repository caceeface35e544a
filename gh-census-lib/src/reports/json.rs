use crate::Result;
use crate::queries::QuestionAnswer;
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(answers: &[QuestionAnswer], writer: &mut W) -> Result<()> {
    let entries: Vec<_> = answers
        .iter()
        .map(|qa| {
            json!({
                "question": qa.number(),
                "title": qa.title(),
                "answer": qa.answer.to_string(),
            })
        })
        .collect();

    let output = json!({
        "answers": entries
    });

    writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{Answer, QUESTION_DEFINITIONS};

    #[test]
    fn test_json_report() {
        let answers = vec![
            QuestionAnswer {
                def: &QUESTION_DEFINITIONS[8],
                answer: Answer::number(-0.1234),
            },
            QuestionAnswer {
                def: &QUESTION_DEFINITIONS[15],
                answer: Answer::list(["Lee", "Park"]),
            },
        ];

        let mut output = String::new();
        generate(&answers, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let entries = value["answers"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["question"], 9);
        assert_eq!(entries[0]["answer"], "-0.123");
        assert_eq!(entries[1]["title"], "Most common surname(s)");
        assert_eq!(entries[1]["answer"], "Lee,Park");
    }

    #[test]
    fn test_json_report_empty() {
        let mut output = String::new();
        generate(&[], &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, json!({"answers": []}));
    }
}
