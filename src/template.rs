// Pattern 3: Template Method - shared exam flow, per-student answers
//
// Every student sees the same problems in the same order; only the answers
// differ. The flow lives in provided trait methods and implementors override
// the single step that varies.

use std::io::Write;

use crate::error::PatternError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    One,
    Two,
    Three,
}

impl Problem {
    pub const ALL: [Problem; 3] = [Problem::One, Problem::Two, Problem::Three];

    pub fn number(&self) -> u8 {
        match self {
            Problem::One => 1,
            Problem::Two => 2,
            Problem::Three => 3,
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Problem::One => "Prob 1, a: a, b:b, c:c, d:d ",
            Problem::Two => "Prob 2, a: a, b:b, c:c, d:d ",
            Problem::Three => "Prob 3, a: a, b:b, c:c, d:d ",
        }
    }
}

pub trait Exam {
    /// The only step that varies between students. Unanswered by default.
    fn answer(&self, _problem: Problem) -> &str {
        ""
    }

    /// Shows the problem, then this student's answer.
    fn do_problem(&self, problem: Problem, out: &mut dyn Write) -> Result<(), PatternError> {
        writeln!(out, "{}", problem.prompt())?;
        writeln!(out, "Prob{} answer: {}", problem.number(), self.answer(problem))?;
        Ok(())
    }

    fn sit(&self, out: &mut dyn Write) -> Result<(), PatternError> {
        for problem in Problem::ALL {
            self.do_problem(problem, out)?;
        }
        Ok(())
    }
}

pub struct ExamA;

impl Exam for ExamA {
    fn answer(&self, problem: Problem) -> &str {
        match problem {
            Problem::One => "a",
            Problem::Two => "b",
            Problem::Three => "c",
        }
    }
}

pub struct ExamB;

impl Exam for ExamB {
    fn answer(&self, problem: Problem) -> &str {
        match problem {
            Problem::One => "c",
            Problem::Two => "b",
            Problem::Three => "a",
        }
    }
}
