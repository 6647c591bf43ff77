use std::collections::HashMap;
use std::fmt::Debug;
use std::future::poll_fn;
use std::hash::Hash;
use std::pin::{Pin, pin};
use std::sync::Arc;
use std::task::{Poll, Waker};

use parking_lot::Mutex;

pub trait BatchLoader {
    type K: Hash + Eq + Clone;
    type V: Clone;

    /// Loads all `keys` at once. Keys missing from the returned map resolve to `None`.
    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static;
}

type Batch<K, V> = Pin<Box<dyn Future<Output = HashMap<K, V>> + Send>>;

enum Entry<V> {
    Requested(Vec<Waker>),
    Ready(Option<V>),
}

struct LoaderInner<B: BatchLoader> {
    values: HashMap<B::K, Entry<B::V>>,
    pending_keys: HashMap<B::K, Vec<Waker>>,
    load_batch: B,
}

/// Collects the keys requested while a wrapped future makes progress and
/// resolves them with one [`BatchLoader::load_batch`] call per round.
///
/// Loaded values are cached for the lifetime of the loader, so a loader should
/// be created per request.
pub struct DataLoader<B: BatchLoader> {
    inner: Arc<Mutex<LoaderInner<B>>>,
}
impl<B: BatchLoader> Clone for DataLoader<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<B: BatchLoader> DataLoader<B>
where
    B::K: Debug,
{
    pub fn new(load_batch: B) -> Self {
        let inner = LoaderInner {
            load_batch,
            values: Default::default(),
            pending_keys: Default::default(),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Resolves once the batch containing `key` has been loaded.
    ///
    /// Only makes progress inside a future driven by [`DataLoader::wrap`].
    pub fn load(&self, key: B::K) -> impl Future<Output = Option<B::V>> {
        poll_fn(move |cx| {
            let mut inner = self.inner.lock();

            let wakers = match inner.values.get_mut(&key) {
                Some(Entry::Ready(v)) => {
                    return Poll::Ready(v.clone());
                }
                Some(Entry::Requested(wakers)) => wakers,
                None => inner.pending_keys.entry(key.clone()).or_insert_with(|| {
                    tracing::trace!(?key, "queued key for next batch");
                    vec![]
                }),
            };

            wakers.push(cx.waker().clone());
            Poll::Pending
        })
    }

    pub async fn wrap<O>(&self, fut: impl Future<Output = O>) -> O {
        let mut currently_loading: Option<(Vec<B::K>, Batch<B::K, B::V>)> = None;

        let mut fut = pin!(fut);
        poll_fn(move |cx| {
            if let Some((keys, batch)) = &mut currently_loading {
                match batch.as_mut().poll(cx) {
                    Poll::Ready(mut loaded) => {
                        let mut inner = self.inner.lock();

                        // Wake all the `load` calls waiting on this batch
                        for key in keys.drain(..) {
                            let value = loaded.remove(&key);
                            if let Some(Entry::Requested(wakers)) =
                                inner.values.insert(key, Entry::Ready(value))
                            {
                                wakers.into_iter().for_each(Waker::wake);
                            }
                        }

                        currently_loading = None;
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            let res = fut.as_mut().poll(cx);
            if res.is_pending() {
                // The inner future may have registered more keys while being polled.
                let mut inner = self.inner.lock();

                if !inner.pending_keys.is_empty() {
                    let pending = std::mem::take(&mut inner.pending_keys);
                    let mut keys = Vec::with_capacity(pending.len());
                    for (k, wakers) in pending {
                        keys.push(k.clone());
                        inner.values.insert(k, Entry::Requested(wakers));
                    }

                    tracing::debug!(keys = ?keys, "loading batch");
                    let batch: Batch<B::K, B::V> =
                        Box::pin(inner.load_batch.load_batch(keys.clone()));
                    currently_loading = Some((keys, batch));

                    // Wake immediately, to instruct the runtime to call `poll` again.
                    cx.waker().wake_by_ref();
                }
            }
            res
        })
        .await
    }
}
