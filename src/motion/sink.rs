//! Sample sinks.
//!
//! The engine pushes every position into a sink the moment it is produced,
//! so a sink may stream samples elsewhere or refuse further samples to stop
//! the run between two samples.

use crate::error::{ExecutionError, Result};

/// Destination for position samples.
pub trait SampleSink {
    /// Accept the next sample.
    ///
    /// Returning an error stops the run; samples accepted so far stay valid.
    fn push(&mut self, position: i64) -> Result<()>;
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    #[inline]
    fn push(&mut self, position: i64) -> Result<()> {
        (**self).push(position)
    }
}

impl<const N: usize> SampleSink for heapless::Vec<i64, N> {
    fn push(&mut self, position: i64) -> Result<()> {
        heapless::Vec::push(self, position).map_err(|_| ExecutionError::BufferFull.into())
    }
}

#[cfg(feature = "alloc")]
impl SampleSink for alloc::vec::Vec<i64> {
    #[inline]
    fn push(&mut self, position: i64) -> Result<()> {
        alloc::vec::Vec::push(self, position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_heapless_sink_full() {
        let mut buf: heapless::Vec<i64, 2> = heapless::Vec::new();
        assert!(SampleSink::push(&mut buf, 1).is_ok());
        assert!(SampleSink::push(&mut buf, 2).is_ok());
        assert_eq!(
            SampleSink::push(&mut buf, 3),
            Err(Error::Execution(ExecutionError::BufferFull))
        );
        assert_eq!(buf.as_slice(), &[1, 2]);
    }
}
