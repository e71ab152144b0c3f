//! Scriptable step adapters.

use crate::adapters::StepAdapter;
use crate::errors::StepError;
use crate::model::StepName;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A step adapter that replays a script of outcomes.
///
/// Each invocation pops the front of the script; once the script is
/// empty, every further invocation returns a clone of the fallback.
/// Calls are counted so tests can assert how many invocations a
/// controller actually made.
pub struct StubAdapter<I, O> {
    step: StepName,
    script: Mutex<VecDeque<Result<O, StepError>>>,
    fallback: Result<O, StepError>,
    calls: AtomicUsize,
    _input: PhantomData<fn(I)>,
}

impl<I, O> fmt::Debug for StubAdapter<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubAdapter")
            .field("step", &self.step)
            .field("calls", &self.calls.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<I, O: Clone> StubAdapter<I, O> {
    /// An adapter whose script is `script`, falling back to `fallback`
    /// once the script runs out.
    #[must_use]
    pub fn scripted(
        step: StepName,
        script: Vec<Result<O, StepError>>,
        fallback: Result<O, StepError>,
    ) -> Self {
        Self {
            step,
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
            _input: PhantomData,
        }
    }

    /// An adapter that always succeeds with `output`.
    #[must_use]
    pub fn ok(step: StepName, output: O) -> Self {
        Self::scripted(step, Vec::new(), Ok(output))
    }

    /// An adapter that always fails permanently.
    #[must_use]
    pub fn permanent(step: StepName, message: impl Into<String>) -> Self {
        Self::scripted(step, Vec::new(), Err(StepError::permanent(message)))
    }

    /// An adapter that always fails transiently.
    #[must_use]
    pub fn transient(step: StepName, message: impl Into<String>) -> Self {
        Self::scripted(step, Vec::new(), Err(StepError::transient(message)))
    }

    /// An adapter that fails transiently `failures` times, then succeeds
    /// with `output` forever.
    #[must_use]
    pub fn transient_then_ok(step: StepName, failures: usize, output: O) -> Self {
        let script = (0..failures)
            .map(|i| Err(StepError::transient(format!("transient failure {}", i + 1))))
            .collect();
        Self::scripted(step, script, Ok(output))
    }

    /// How many times `invoke` has run.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<I, O> StepAdapter for StubAdapter<I, O>
where
    I: Clone + Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    type Input = I;
    type Output = O;

    fn step(&self) -> StepName {
        self.step
    }

    async fn invoke(&self, _input: I) -> Result<O, StepError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.script.lock().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_fallback() {
        let stub: StubAdapter<(), u32> = StubAdapter::scripted(
            StepName::Recipe,
            vec![Err(StepError::transient("busy")), Ok(1)],
            Ok(2),
        );

        assert!(stub.invoke(()).await.is_err());
        assert_eq!(stub.invoke(()).await.unwrap(), 1);
        assert_eq!(stub.invoke(()).await.unwrap(), 2);
        assert_eq!(stub.invoke(()).await.unwrap(), 2);
        assert_eq!(stub.call_count(), 4);
    }

    #[tokio::test]
    async fn test_transient_then_ok_counts_failures() {
        let stub: StubAdapter<(), &str> =
            StubAdapter::transient_then_ok(StepName::Shopping, 2, "done");

        assert!(stub.invoke(()).await.is_err());
        assert!(stub.invoke(()).await.is_err());
        assert_eq!(stub.invoke(()).await.unwrap(), "done");
    }
}
