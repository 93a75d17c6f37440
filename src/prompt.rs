use std::io::{BufRead, Write};

/// Asks the user for a new value, showing the current one.
/// An empty answer means "keep the current value".
pub trait Prompter {
    fn prompt(&mut self, question: &str, current: &str) -> std::io::Result<String>;
}

/// Prompts on stdout and reads one line from stdin.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&mut self, question: &str, current: &str) -> std::io::Result<String> {
        print!("{} [{}]: ", question, current);
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(answer
            .trim_end_matches(|c: char| c == '\n' || c == '\r')
            .to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Answers from a fixed script and records every question asked.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<String>,
        pub asked: Vec<(String, String)>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn prompt(&mut self, question: &str, current: &str) -> std::io::Result<String> {
            self.asked.push((question.to_string(), current.to_string()));
            Ok(self.answers.pop_front().unwrap_or_default())
        }
    }

    #[test]
    fn test_scripted_prompter_runs_out_to_empty_answers() {
        let mut prompter = ScriptedPrompter::new(&["one"]);
        assert_eq!(prompter.prompt("A", "x").unwrap(), "one");
        assert_eq!(prompter.prompt("B", "y").unwrap(), "");
        assert_eq!(prompter.asked.len(), 2);
    }
}
