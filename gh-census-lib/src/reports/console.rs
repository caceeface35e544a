use crate::Result;
use crate::queries::{Answer, QuestionAnswer};
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write one `N. title: answer` line per question.
pub fn generate<W: Write>(answers: &[QuestionAnswer], use_colors: bool, writer: &mut W) -> Result<()> {
    for qa in answers {
        let number = format!("{}.", qa.number());
        let answer = qa.answer.to_string();

        if use_colors {
            let answer = if matches!(qa.answer, Answer::NoData(_)) {
                answer.dimmed().to_string()
            } else {
                answer
            };
            writeln!(writer, "{} {}: {answer}", number.bold(), qa.title())?;
        } else {
            writeln!(writer, "{number} {}: {answer}", qa.title())?;
        }
    }

    Ok(())
}
