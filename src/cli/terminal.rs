//! Line-oriented terminal helpers shared by the interactive commands.
//!
//! Everything is generic over `BufRead`/`Write` so the drivers can be tested
//! against in-memory buffers.

use std::io::{self, BufRead, Write};

use crate::core::{AnswerOutcome, Question, WordId};

/// What the learner typed at a question prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// A valid choice, already mapped to the word id.
    Choice(WordId),
    /// `q` or end of input.
    Quit,
}

/// Read one trimmed line, or `None` at end of input.
pub fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Print a prompt and read the reply.
pub fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    read_line(input)
}

/// Print the question with numbered choices.
pub fn render_question<O: Write>(output: &mut O, header: &str, question: &Question) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}  {}", header, question.correct.english)?;
    for (i, word) in question.choices.iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, word.japanese)?;
    }
    Ok(())
}

/// Ask until the learner picks a listed number or quits.
pub fn read_choice<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    question: &Question,
) -> io::Result<Reply> {
    let count = question.choices.len();
    loop {
        let Some(line) = prompt(input, output, &format!("Answer [1-{}, q]: ", count))? else {
            return Ok(Reply::Quit);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(Reply::Quit);
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => {
                return Ok(Reply::Choice(question.choices[n - 1].id));
            }
            _ => writeln!(output, "Please enter a number from 1 to {}.", count)?,
        }
    }
}

/// Show whether the answer was right, with the example sentence.
pub fn render_feedback<O: Write>(
    output: &mut O,
    question: &Question,
    outcome: &AnswerOutcome,
) -> io::Result<()> {
    let word = &question.correct;
    if outcome.is_correct {
        writeln!(output, "Correct! {} = {}", word.english, word.japanese)?;
    } else {
        writeln!(output, "Wrong. {} = {}", word.english, word.japanese)?;
    }
    writeln!(output, "  {}", word.example)?;
    if let Some(example_ja) = &word.example_ja {
        writeln!(output, "  {}", example_ja)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use std::io::Cursor;

    fn question() -> Question {
        let words: Vec<Word> = (1..=4)
            .map(|i| Word::new(i, format!("word{}", i), format!("意味{}", i), "Example."))
            .collect();
        Question {
            correct: words[2].clone(),
            choices: vec![words[1].clone(), words[2].clone(), words[0].clone(), words[3].clone()],
        }
    }

    #[test]
    fn test_read_line_trims_and_detects_eof() {
        let mut input = Cursor::new("  2 \n");
        assert_eq!(read_line(&mut input).unwrap(), Some("2".to_string()));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_choice_maps_number_to_word() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        assert_eq!(
            read_choice(&mut input, &mut output, &question()).unwrap(),
            Reply::Choice(3)
        );
    }

    #[test]
    fn test_read_choice_reprompts_on_bad_input() {
        let mut input = Cursor::new("0\nfive\n4\n");
        let mut output = Vec::new();
        assert_eq!(
            read_choice(&mut input, &mut output, &question()).unwrap(),
            Reply::Choice(4)
        );
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Please enter a number from 1 to 4.").count(), 2);
    }

    #[test]
    fn test_read_choice_quit_and_eof() {
        let mut output = Vec::new();
        assert_eq!(
            read_choice(&mut Cursor::new("Q\n"), &mut output, &question()).unwrap(),
            Reply::Quit
        );
        assert_eq!(
            read_choice(&mut Cursor::new(""), &mut output, &question()).unwrap(),
            Reply::Quit
        );
    }

    #[test]
    fn test_render_question_numbers_choices() {
        let mut output = Vec::new();
        render_question(&mut output, "[1/3]", &question()).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[1/3]  word3"));
        assert!(text.contains("  1) 意味2"));
        assert!(text.contains("  4) 意味4"));
    }

    #[test]
    fn test_render_feedback() {
        let q = question();
        let mut output = Vec::new();
        let outcome = AnswerOutcome {
            word_id: 3,
            selected_id: 1,
            is_correct: false,
        };
        render_feedback(&mut output, &q, &outcome).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Wrong. word3 = 意味3"));
        assert!(text.contains("Example."));
    }
}
