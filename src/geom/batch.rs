//! Elementwise evaluation of per-item predicates over batches.
//!
//! Every output has the length and ordering of its input. With the `parallel`
//! feature the work is spread over the rayon pool; results are identical.

cfg_if::cfg_if! {
    if #[cfg(feature = "parallel")] {
        use rayon::prelude::*;

        pub(crate) fn map_batch<T, R, F>(items: &[T], f: F) -> Vec<R>
        where
            T: Sync,
            R: Send,
            F: Fn(&T) -> R + Sync + Send,
        {
            items.par_iter().map(f).collect()
        }

        pub(crate) fn zip_batch<T, R, F>(left: &[T], right: &[T], f: F) -> Vec<R>
        where
            T: Sync,
            R: Send,
            F: Fn(&T, &T) -> R + Sync + Send,
        {
            left.par_iter()
                .zip(right.par_iter())
                .map(|(l, r)| f(l, r))
                .collect()
        }
    } else {
        pub(crate) fn map_batch<T, R, F>(items: &[T], f: F) -> Vec<R>
        where
            F: Fn(&T) -> R,
        {
            items.iter().map(f).collect()
        }

        pub(crate) fn zip_batch<T, R, F>(left: &[T], right: &[T], f: F) -> Vec<R>
        where
            F: Fn(&T, &T) -> R,
        {
            left.iter().zip(right).map(|(l, r)| f(l, r)).collect()
        }
    }
}
