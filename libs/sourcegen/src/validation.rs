//! Error-accumulating results
//!
//! [`Validation`] is a result whose failure side collects every error from
//! independent computations instead of stopping at the first one. Combining
//! two validations is a monoid operation:
//!
//! - the identity is `Success(T::empty())`
//! - two successes concatenate their values in operand order
//! - a failure absorbs any success and concatenates with other failures
//!
//! Collecting an iterator of validations evaluates every item and folds them
//! with [`Validation::combine`].

use std::vec;

use crate::error::GenerationError;

/// A non-empty, ordered list of errors.
#[derive(Debug)]
pub struct Errors(Vec<GenerationError>);

impl Errors {
    pub fn single(error: GenerationError) -> Self {
        Self(vec![error])
    }

    pub fn first(&self) -> &GenerationError {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn append(&mut self, mut other: Errors) {
        self.0.append(&mut other.0);
    }

    pub fn into_vec(self) -> Vec<GenerationError> {
        self.0
    }
}

impl From<GenerationError> for Errors {
    fn from(error: GenerationError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for Errors {
    type Item = GenerationError;
    type IntoIter = vec::IntoIter<GenerationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Success values that can be concatenated.
pub trait Accumulate {
    fn empty() -> Self;
    fn concat(self, other: Self) -> Self;
}

impl<T> Accumulate for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn concat(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

/// Completion marker for steps that produce nothing but may fail.
impl Accumulate for () {
    fn empty() -> Self {}

    fn concat(self, _other: Self) -> Self {}
}

/// Either every error from a set of computations, or their combined value.
#[derive(Debug)]
pub enum Validation<T> {
    Success(T),
    Failure(Errors),
}

impl<T> Validation<T> {
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    pub fn failure(error: GenerationError) -> Self {
        Validation::Failure(Errors::single(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    pub fn map<U, F>(self, f: F) -> Validation<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    /// Chain a dependent step. Unlike [`combine`](Self::combine) this stops at
    /// the first failure, since `f` needs the success value to run at all.
    pub fn and_then<U, F>(self, f: F) -> Validation<U>
    where
        F: FnOnce(T) -> Validation<U>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    pub fn into_result(self) -> Result<T, Errors> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(errors) => Err(errors),
        }
    }

    /// The accumulated errors, or an empty list on success.
    pub fn into_errors(self) -> Vec<GenerationError> {
        match self {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }
}

impl<T: Accumulate> Validation<T> {
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success(a.concat(b)),
            (Validation::Failure(errors), Validation::Success(_))
            | (Validation::Success(_), Validation::Failure(errors)) => Validation::Failure(errors),
            (Validation::Failure(mut a), Validation::Failure(b)) => {
                a.append(b);
                Validation::Failure(a)
            }
        }
    }
}

impl<T: Accumulate> Default for Validation<T> {
    fn default() -> Self {
        Validation::Success(T::empty())
    }
}

impl<T> From<Result<T, GenerationError>> for Validation<T> {
    fn from(result: Result<T, GenerationError>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::failure(error),
        }
    }
}

impl<T: Accumulate> FromIterator<Validation<T>> for Validation<T> {
    fn from_iter<I: IntoIterator<Item = Validation<T>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Validation::default(), Validation::combine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail(key: &str) -> Validation<Vec<u32>> {
        Validation::failure(GenerationError::MalformedKey { key: key.into() })
    }

    fn keys<T>(validation: Validation<T>) -> Vec<String> {
        validation
            .into_errors()
            .into_iter()
            .map(|e| match e {
                GenerationError::MalformedKey { key } => key,
                other => panic!("unexpected error {other}"),
            })
            .collect()
    }

    #[test]
    fn empty_fold_is_identity() {
        let folded: Validation<Vec<u32>> = std::iter::empty().collect();
        match folded {
            Validation::Success(values) => assert!(values.is_empty()),
            Validation::Failure(_) => panic!("empty fold must succeed"),
        }
    }

    #[test]
    fn successes_concatenate_in_order() {
        let folded: Validation<Vec<u32>> = vec![
            Validation::success(vec![1, 2]),
            Validation::success(vec![]),
            Validation::success(vec![3]),
        ]
        .into_iter()
        .collect();

        assert_eq!(folded.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn failures_absorb_successes_and_keep_order() {
        let folded: Validation<Vec<u32>> = vec![
            Validation::success(vec![1]),
            fail("a"),
            Validation::success(vec![2]),
            fail("b"),
            fail("c"),
        ]
        .into_iter()
        .collect();

        assert!(!folded.is_success());
        assert_eq!(keys(folded), vec!["a", "b", "c"]);
    }

    #[test]
    fn combine_is_associative() {
        let left = fail("a").combine(fail("b")).combine(fail("c"));
        let right = fail("a").combine(fail("b").combine(fail("c")));
        assert_eq!(keys(left), keys(right));

        let left = Validation::success(vec![1])
            .combine(Validation::success(vec![2]))
            .combine(Validation::success(vec![3]));
        let right = Validation::success(vec![1])
            .combine(Validation::success(vec![2]).combine(Validation::success(vec![3])));
        assert_eq!(left.into_result().unwrap(), right.into_result().unwrap());
    }

    #[test]
    fn swapping_operands_keeps_the_error_set() {
        let mut forward = keys(fail("a").combine(fail("b")));
        let mut backward = keys(fail("b").combine(fail("a")));
        forward.sort();
        backward.sort();
        assert_eq!(forward, backward);
    }

    #[test]
    fn every_item_is_evaluated() {
        let mut seen = Vec::new();
        let folded: Validation<()> = (0..4)
            .map(|i| {
                seen.push(i);
                if i % 2 == 0 {
                    Validation::failure(GenerationError::MalformedKey { key: i.to_string() })
                } else {
                    Validation::success(())
                }
            })
            .collect();

        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(keys(folded), vec!["0", "2"]);
    }

    #[test]
    fn and_then_short_circuits_within_one_entry() {
        let mut called = false;
        let chained = fail("a").and_then(|v| {
            called = true;
            Validation::success(v)
        });
        assert!(!called);
        assert_eq!(keys(chained), vec!["a"]);

        let mapped = Validation::success(vec![1]).map(|v| v.len());
        assert_eq!(mapped.into_result().unwrap(), 1);
    }

    #[test]
    fn errors_keep_insertion_order() {
        let mut errors = Errors::single(GenerationError::MalformedKey { key: "x".into() });
        errors.append(Errors::from(GenerationError::MalformedKey { key: "y".into() }));
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors.first(), GenerationError::MalformedKey { key } if key == "x"));
    }
}
