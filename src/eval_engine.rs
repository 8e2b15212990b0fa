use std::fmt;
use thiserror::Error;

/// The four recognized operations. Word forms are matched exactly,
/// case-sensitively: `add`, `subtract`, `multiply`, `divide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "add" => Some(Operator::Add),
            "subtract" => Some(Operator::Subtract),
            "multiply" => Some(Operator::Multiply),
            "divide" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

#[derive(Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
}

/// Where a malformed expression fell apart during reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnderflowAt {
    /// An operator needed two operands but the stack ran dry.
    Apply(Operator),
    /// No value was left on the stack for the final result.
    FinalResult,
    /// Values remained on the stack after all operators were applied.
    LeftoverOperands,
}

impl fmt::Display for UnderflowAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnderflowAt::Apply(op) => write!(f, "missing operand for '{}'", op),
            UnderflowAt::FinalResult => write!(f, "expression has no result value"),
            UnderflowAt::LeftoverOperands => write!(f, "expression has too many operands"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Token is neither a number nor a recognized operator word.
    #[error("invalid token: '{0}'")]
    InvalidToken(String),
    #[error("division by zero")]
    DivisionByZero,
    /// Operand and operator counts don't line up (N numbers need N-1 operators).
    #[error("{0}")]
    StackUnderflow(UnderflowAt),
    /// An operator survived classification without a known meaning.
    /// Every recognized word maps onto [`Operator`] before reduction,
    /// so this cannot occur today; kept so callers can match on it.
    #[error("invalid operator: '{0}'")]
    InvalidOperator(String),
}

pub struct Step {
    pub operation: String,
    pub result: f64,
}

pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }
}

/// Collapses runs of whitespace to single spaces and trims the ends.
pub fn normalize_whitespace(expr: &str) -> String {
    expr.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits an expression into raw tokens. No validation happens here;
/// [`evaluate`] classifies each token in turn.
pub fn tokenize(expr: &str) -> Vec<&str> {
    expr.split_whitespace().collect()
}

fn classify(token: &str) -> Result<Token, EvalError> {
    if let Ok(n) = token.parse::<f64>() {
        return Ok(Token::Number(n));
    }
    match Operator::from_word(token) {
        Some(op) => Ok(Token::Op(op)),
        None => Err(EvalError::InvalidToken(token.to_string())),
    }
}

/// Evaluates a word-operator expression like `3 add 5 multiply 2`.
///
/// Numbers go onto an operand stack as they are read; operators go onto
/// their own stack. Once the whole input is consumed, operators are
/// popped LIFO and applied to the top two operands. Application order is
/// therefore the *reverse* of appearance order: `3 add 5 multiply 2`
/// runs `multiply(5, 2)` first, then `add(3, 10)`, giving 13 rather
/// than the 16 a left-to-right fold would produce.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let mut trace = EvaluationTrace::new(false);
    evaluate_traced(expr, &mut trace)
}

/// Same as [`evaluate`], recording one [`Step`] per operator application
/// when the trace is in detailed mode.
pub fn evaluate_traced(expr: &str, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
    let mut numbers: Vec<f64> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();

    for token in tokenize(expr) {
        match classify(token)? {
            Token::Number(n) => numbers.push(n),
            Token::Op(op) => operators.push(op),
        }
    }

    while let Some(op) = operators.pop() {
        apply_operator(&mut numbers, op, trace)?;
    }

    match numbers.pop() {
        Some(result) if numbers.is_empty() => Ok(result),
        Some(_) => Err(EvalError::StackUnderflow(UnderflowAt::LeftoverOperands)),
        None => Err(EvalError::StackUnderflow(UnderflowAt::FinalResult)),
    }
}

fn apply_operator(
    numbers: &mut Vec<f64>,
    op: Operator,
    trace: &mut EvaluationTrace,
) -> Result<(), EvalError> {
    // Pops run in reverse push order: `b` was pushed after `a`.
    let b = numbers
        .pop()
        .ok_or(EvalError::StackUnderflow(UnderflowAt::Apply(op)))?;
    let a = numbers
        .pop()
        .ok_or(EvalError::StackUnderflow(UnderflowAt::Apply(op)))?;

    let result = match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    };

    trace.add_step(format!("{} {} {}", a, op, b), result);
    numbers.push(result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_number_is_its_own_result() {
        assert_eq!(evaluate("42"), Ok(42.0));
        assert_eq!(evaluate("-3.5"), Ok(-3.5));
    }

    #[test]
    fn basic_operations() {
        assert_eq!(evaluate("3 add 5"), Ok(8.0));
        assert_eq!(evaluate("10 subtract 4"), Ok(6.0));
        assert_eq!(evaluate("6 multiply 7"), Ok(42.0));
        assert_eq!(evaluate("15 divide 3"), Ok(5.0));
    }

    #[test]
    fn operators_apply_in_reverse_appearance_order() {
        // multiply(5, 2) = 10, then add(3, 10) = 13 -- not 16.
        assert_eq!(evaluate("3 add 5 multiply 2"), Ok(13.0));
        // divide(6, 2) = 3, then subtract(10, 3) = 7.
        assert_eq!(evaluate("10 subtract 6 divide 2"), Ok(7.0));
    }

    #[test]
    fn three_operators_reduce_right_to_left() {
        // add(3, 4) = 7, multiply(2, 7) = 14, subtract(1, 14) = -13.
        assert_eq!(evaluate("1 subtract 2 multiply 3 add 4"), Ok(-13.0));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(evaluate("10 divide 0"), Err(EvalError::DivisionByZero));
        // 0.0 on the right in any position trips the guard.
        assert_eq!(
            evaluate("1 add 2 divide 0"),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn dividing_zero_is_fine() {
        assert_eq!(evaluate("0 divide 5"), Ok(0.0));
    }

    #[test]
    fn unknown_token_carries_its_text() {
        assert_eq!(
            evaluate("3 foo 5"),
            Err(EvalError::InvalidToken("foo".to_string()))
        );
    }

    #[test]
    fn operator_words_are_case_sensitive() {
        assert_eq!(
            evaluate("3 Add 5"),
            Err(EvalError::InvalidToken("Add".to_string()))
        );
    }

    #[test]
    fn leading_operator_underflows_on_apply() {
        assert_eq!(
            evaluate("add 3"),
            Err(EvalError::StackUnderflow(UnderflowAt::Apply(Operator::Add)))
        );
    }

    #[test]
    fn empty_and_blank_input_fail() {
        assert_eq!(
            evaluate(""),
            Err(EvalError::StackUnderflow(UnderflowAt::FinalResult))
        );
        assert_eq!(
            evaluate("   "),
            Err(EvalError::StackUnderflow(UnderflowAt::FinalResult))
        );
    }

    #[test]
    fn extra_operands_are_rejected() {
        assert_eq!(
            evaluate("3 4 add 5"),
            Err(EvalError::StackUnderflow(UnderflowAt::LeftoverOperands))
        );
        assert_eq!(
            evaluate("1 2"),
            Err(EvalError::StackUnderflow(UnderflowAt::LeftoverOperands))
        );
    }

    #[test]
    fn whitespace_runs_do_not_change_the_result() {
        assert_eq!(evaluate("3   add    5"), evaluate("3 add 5"));
        assert_eq!(evaluate("\t3\tadd\n5  "), Ok(8.0));
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let first = evaluate("3 add 5 multiply 2");
        for _ in 0..10 {
            assert_eq!(evaluate("3 add 5 multiply 2"), first);
        }
    }

    #[test]
    fn number_forms() {
        assert_eq!(evaluate("1.5 add 2.25"), Ok(3.75));
        assert_eq!(evaluate("-2 multiply 3"), Ok(-6.0));
        assert_eq!(evaluate("+4 add 1"), Ok(5.0));
    }

    #[test]
    fn normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("  3   add \t 5 "), "3 add 5");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn tokenize_preserves_order_without_validation() {
        assert_eq!(tokenize("3 foo add"), vec!["3", "foo", "add"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn trace_records_one_step_per_application() {
        let mut trace = EvaluationTrace::new(true);
        assert_eq!(evaluate_traced("3 add 5 multiply 2", &mut trace), Ok(13.0));
        let rendered: Vec<_> = trace
            .steps
            .iter()
            .map(|s| format!("{} = {}", s.operation, s.result))
            .collect();
        assert_eq!(rendered, vec!["5 multiply 2 = 10", "3 add 10 = 13"]);
    }

    #[test]
    fn trace_stays_empty_outside_detailed_mode() {
        let mut trace = EvaluationTrace::new(false);
        assert_eq!(evaluate_traced("3 add 5", &mut trace), Ok(8.0));
        assert!(trace.steps.is_empty());
    }
}
