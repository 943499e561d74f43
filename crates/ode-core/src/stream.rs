//! The lazy query stream: a memoized evaluator `T -> (A, Stream<T, A>)`.
//!
//! A [`Stream`] carries an integrator's internal state between queries at
//! advancing keys `T` (normally time). Querying at a new key produces a
//! value and a successor stream anchored there; the original stream is left
//! untouched, so the same stream may be queried again, or queried at a
//! different key from a different context, without disturbing its siblings
//! (§5 of the spec this crate implements).
//!
//! Both the head and the tail are stored as `Rc<dyn Fn>` thunks rather than
//! as an eagerly-computed value, which is what lets [`bottom`] exist: its
//! head thunk panics only when actually called, matching "reading the head
//! of `bottom` is a programming error" rather than making construction
//! itself fail.

use std::rc::Rc;

/// A lazy, memoized evaluator keyed by `T` and producing values of type `A`.
///
/// Cloning a `Stream` is `O(1)` (an `Rc` clone of both thunks), so producing
/// a successor never mutates the stream it was produced from.
pub struct Stream<T, A> {
    head: Rc<dyn Fn() -> A>,
    tail: Rc<dyn Fn(T) -> Stream<T, A>>,
}

impl<T, A> Clone for Stream<T, A> {
    fn clone(&self) -> Self {
        Stream {
            head: Rc::clone(&self.head),
            tail: Rc::clone(&self.tail),
        }
    }
}

impl<T, A> Stream<T, A> {
    /// Builds a stream from a head thunk and a tail (advance) function.
    pub fn new<H, K>(head: H, tail: K) -> Self
    where
        H: Fn() -> A + 'static,
        K: Fn(T) -> Stream<T, A> + 'static,
    {
        Stream {
            head: Rc::new(head),
            tail: Rc::new(tail),
        }
    }

    /// Builds a stream from a concrete head value and a tail function.
    pub fn from_value<K>(value: A, tail: K) -> Self
    where
        A: Clone + 'static,
        K: Fn(T) -> Stream<T, A> + 'static,
    {
        Stream::new(move || value.clone(), tail)
    }

    /// The value at this stream's anchor.
    ///
    /// Cheap to produce by contract (§3): implementations must not perform
    /// integration work here.
    pub fn head(&self) -> A {
        (self.head)()
    }

    /// Advances to `t`, returning the value there and the successor stream.
    pub fn query(&self, t: T) -> (A, Stream<T, A>) {
        let next = (self.tail)(t);
        let value = next.head();
        (value, next)
    }

    /// Advances to `t`, discarding the value and keeping only the successor.
    pub fn seek(&self, t: T) -> Stream<T, A> {
        (self.tail)(t)
    }

    /// Advances to `t`, discarding the successor and keeping only the value.
    pub fn get(&self, t: T) -> A {
        (self.tail)(t).head()
    }

    /// Scans across a sequence of query points, threading state through each.
    pub fn query_many(&self, ts: impl IntoIterator<Item = T>) -> (Vec<A>, Stream<T, A>) {
        let mut current = self.clone();
        let mut values = Vec::new();
        for t in ts {
            let (value, next) = current.query(t);
            values.push(value);
            current = next;
        }
        (values, current)
    }
}

impl<T: 'static, A: 'static> Stream<T, A> {
    /// Post-composes `g` onto every value this stream emits.
    pub fn map<B, G>(&self, g: G) -> Stream<T, B>
    where
        B: 'static,
        G: Fn(A) -> B + Clone + 'static,
    {
        let head = Rc::clone(&self.head);
        let tail = Rc::clone(&self.tail);
        let g_head = g.clone();
        Stream::new(move || g_head(head()), move |t| tail(t).map(g.clone()))
    }

    /// Pre-composes `h` onto every incoming key.
    ///
    /// Each query key `u: U` is transformed via `h` into this stream's key
    /// type `T` before being used to advance.
    pub fn premap<U, H>(&self, h: H) -> Stream<U, A>
    where
        U: 'static,
        H: Fn(U) -> T + Clone + 'static,
    {
        let head = Rc::clone(&self.head);
        let tail = Rc::clone(&self.tail);
        let h_tail = h.clone();
        Stream::new(move || head(), move |u: U| tail(h_tail(u)).premap(h.clone()))
    }
}

/// A stream that emits the same value for every key, forever.
pub fn const_stream<T: 'static, A: Clone + 'static>(value: A) -> Stream<T, A> {
    Stream::from_value(value.clone(), move |_t| const_stream(value.clone()))
}

/// A stream that re-derives its value from each incoming key via `k`,
/// anchored initially at `t0`.
///
/// The spec's `pure(k)` has no key to evaluate the head at until the first
/// query; this Rust rendition takes the anchor explicitly rather than
/// requiring `T: Default`.
pub fn pure<T, A, K>(t0: T, k: K) -> Stream<T, A>
where
    T: Clone + 'static,
    A: 'static,
    K: Fn(T) -> A + Clone + 'static,
{
    let k_head = k.clone();
    let t0_head = t0.clone();
    Stream::new(move || k_head(t0_head.clone()), move |t: T| pure(t, k.clone()))
}

/// The stream whose value must never be read.
///
/// Used as the auxiliary-signal stream for integrands that ignore their
/// `x` argument; reading its head is a programmer error and panics
/// immediately.
pub fn bottom<T: 'static, A: 'static>() -> Stream<T, A> {
    Stream::new(
        || panic!("attempted to read the head of the `bottom` stream"),
        |_t| bottom(),
    )
}

/// Stream-level composition `f ∘ g`: `g` consumes `T` and produces `U`,
/// which is fed into `f` to produce `V`.
pub fn compose<T, U, V>(f: Stream<U, V>, g: Stream<T, U>) -> Stream<T, V>
where
    T: 'static,
    U: 'static,
    V: 'static,
{
    let head = Rc::clone(&f.head);
    Stream::new(move || head(), move |t: T| {
        let (u, g_next) = g.query(t);
        let (_, f_next) = f.query(u);
        compose(f_next, g_next)
    })
}

/// Element-wise sequencing of several streams into a stream of vectors of
/// their values.
pub fn seq<T, A>(streams: Vec<Stream<T, A>>) -> Stream<T, Vec<A>>
where
    T: Clone + 'static,
    A: 'static,
{
    let for_head = streams.clone();
    Stream::new(
        move || for_head.iter().map(Stream::head).collect(),
        move |t: T| {
            let next: Vec<Stream<T, A>> = streams.iter().map(|s| s.seek(t.clone())).collect();
            seq(next)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_stream_always_returns_same_value() {
        let s: Stream<f64, i32> = const_stream(7);
        assert_eq!(s.head(), 7);
        let (v, s2) = s.query(100.0);
        assert_eq!(v, 7);
        assert_eq!(s2.get(1e9), 7);
    }

    #[test]
    fn pure_rederives_from_each_key() {
        let s: Stream<f64, f64> = pure(0.0, |t| t * t);
        assert_eq!(s.head(), 0.0);
        assert_eq!(s.get(3.0), 9.0);
        let (v, s2) = s.query(4.0);
        assert_eq!(v, 16.0);
        assert_eq!(s2.get(5.0), 25.0);
    }

    #[test]
    #[should_panic]
    fn bottom_panics_on_read() {
        let s: Stream<f64, f64> = bottom();
        let _ = s.head();
    }

    #[test]
    fn bottom_tail_is_readable_as_long_as_head_is_not() {
        let s: Stream<f64, f64> = bottom();
        let s2 = s.seek(1.0);
        // Seeking never touches the head thunk, so this must not panic.
        let _ = s2;
    }

    #[test]
    fn map_post_composes() {
        let s: Stream<f64, f64> = pure(0.0, |t| t);
        let doubled = s.map(|v| v * 2.0);
        assert_eq!(doubled.get(3.0), 6.0);
    }

    #[test]
    fn premap_pre_composes() {
        let s: Stream<f64, f64> = pure(0.0, |t| t);
        let shifted = s.premap(|u: f64| u + 1.0);
        assert_eq!(shifted.get(3.0), 4.0);
    }

    #[test]
    fn compose_feeds_g_output_into_f() {
        let g: Stream<f64, f64> = pure(0.0, |t| t * 2.0);
        let f: Stream<f64, f64> = pure(0.0, |u| u + 1.0);
        let composed = compose(f, g);
        // g(3.0) = 6.0, f(6.0) = 7.0
        assert_eq!(composed.get(3.0), 7.0);
    }

    #[test]
    fn seq_collects_element_wise() {
        let a: Stream<f64, f64> = pure(0.0, |t| t);
        let b: Stream<f64, f64> = pure(0.0, |t| t * t);
        let both = seq(vec![a, b]);
        assert_eq!(both.get(3.0), vec![3.0, 9.0]);
    }

    #[test]
    fn query_many_threads_state() {
        let s: Stream<f64, f64> = pure(0.0, |t| t);
        let (values, _tail) = s.query_many(vec![1.0, 2.0, 3.0]);
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
