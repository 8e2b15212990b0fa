//! # wordcalc
//!
//! A minimal calculator for expressions written with operator words
//! instead of symbols: `3 add 5 multiply 2`. Numbers and operators
//! collect on two stacks in one pass over the input; operators are then
//! applied last-to-first, with no precedence and no parentheses.

pub mod eval_engine;

pub use eval_engine::{
    evaluate, evaluate_traced, EvalError, EvaluationTrace, Operator, Step, Token, UnderflowAt,
};
