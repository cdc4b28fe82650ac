//! Filtered, bidirectional views over indexable collections.
//!
//! A [`FilteredIndexView`] borrows a [`Collection`] and presents either all of
//! its entries or only the accepted ones, without copying any element:
//!
//! ```text
//!   Collection          view (accepted)        logical index
//!   ┌───┬───┬───┬───┬───┐
//!   │ 0 │ 1 │ 2 │ 3 │ 4 │  ──▶  [0, 2, 4]  ──▶   0, 1, 2
//!   └───┴───┴───┴───┴───┘
//! ```
//!
//! In filtered mode the accepted indices are collected once, when the view is
//! built. Iteration then maps logical positions through that cache back into
//! the collection.

use std::fmt;
use std::iter::FusedIterator;

use log::{debug, warn};

// ---------------------------------------------------------------------------
// Collection – what a view needs from the underlying container
// ---------------------------------------------------------------------------

/// An indexable container with a per-entry acceptance predicate.
pub trait Collection {
    /// Element type handed out by [`Collection::object_at`].
    type Object: ?Sized;

    /// Reason reported when an entry is not accepted.
    type Rejection;

    /// Total number of entries, accepted or not.
    fn entry_count(&self) -> usize;

    /// Number of entries passing [`Collection::accept_object`].
    ///
    /// Views use this to size their index cache and treat it as authoritative.
    fn accepted_count(&self) -> usize;

    /// Evaluate the acceptance predicate for the entry at `index`.
    fn accept_object(&self, index: usize) -> Result<(), Self::Rejection>;

    /// Entry at `index`, or `None` if the index is out of range or the slot is empty.
    fn object_at(&self, index: usize) -> Option<&Self::Object>;
}

// ---------------------------------------------------------------------------
// FilteredIndexView
// ---------------------------------------------------------------------------

/// Non-owning view over all or only the accepted entries of a [`Collection`].
///
/// The view borrows the collection for `'a`, so the collection can neither be
/// dropped nor mutated while the view (or any clone of it) is alive.
pub struct FilteredIndexView<'a, C: Collection + ?Sized> {
    collection: Option<&'a C>,
    accepted_indices: Vec<usize>,
    use_accepted: bool,
}

impl<'a, C: Collection + ?Sized> FilteredIndexView<'a, C> {
    /// A view bound to no collection. It has no entries.
    pub fn unbound() -> Self {
        Self {
            collection: None,
            accepted_indices: Vec::new(),
            use_accepted: false,
        }
    }

    /// Bind a view to `collection`.
    ///
    /// With `use_accepted` the collection is scanned once and the indices of
    /// accepted entries are cached; otherwise every entry is visited.
    pub fn new(collection: &'a C, use_accepted: bool) -> Self {
        let accepted_indices = if use_accepted {
            build_accepted_indices(collection)
        } else {
            Vec::new()
        };
        Self {
            collection: Some(collection),
            accepted_indices,
            use_accepted,
        }
    }

    /// View over every entry of `collection`.
    pub fn all(collection: &'a C) -> Self {
        Self::new(collection, false)
    }

    /// View over the accepted entries of `collection`.
    pub fn accepted(collection: &'a C) -> Self {
        Self::new(collection, true)
    }

    /// Number of entries the view iterates over.
    pub fn entries(&self) -> usize {
        match self.collection {
            None => 0,
            Some(_) if self.use_accepted => self.accepted_indices.len(),
            Some(collection) => collection.entry_count(),
        }
    }

    /// Whether the view has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries() == 0
    }

    /// Whether the view only iterates over accepted entries.
    pub fn uses_accepted(&self) -> bool {
        self.use_accepted
    }

    /// The collection this view is bound to.
    pub fn collection(&self) -> Option<&'a C> {
        self.collection
    }

    /// Cached container indices of accepted entries, in container order.
    ///
    /// Empty for views that iterate over all entries.
    pub fn accepted_indices(&self) -> &[usize] {
        &self.accepted_indices
    }

    /// Translate a logical position into an index of the underlying collection.
    pub fn physical_index(&self, index: usize) -> Option<usize> {
        if index >= self.entries() {
            return None;
        }
        if self.use_accepted {
            self.accepted_indices.get(index).copied()
        } else {
            Some(index)
        }
    }

    /// Entry at logical position `index`, `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&'a C::Object> {
        let collection = self.collection?;
        let physical = self.physical_index(index)?;
        collection.object_at(physical)
    }

    /// Forward cursor at the first entry.
    pub fn begin(&self) -> Cursor<'_, 'a, C> {
        Cursor::new(self, 0, Direction::Forward)
    }

    /// Forward sentinel, one past the last entry.
    pub fn end(&self) -> Cursor<'_, 'a, C> {
        Cursor::new(self, self.signed_entries(), Direction::Forward)
    }

    /// Backward cursor at the last entry.
    pub fn rbegin(&self) -> Cursor<'_, 'a, C> {
        Cursor::new(self, self.signed_entries() - 1, Direction::Backward)
    }

    /// Backward sentinel, one before the first entry.
    pub fn rend(&self) -> Cursor<'_, 'a, C> {
        Cursor::new(self, -1, Direction::Backward)
    }

    /// Double-ended iterator over the view's entries.
    ///
    /// Yields one item per logical position, so empty slots reached by an
    /// unfiltered view come out as `None`.
    pub fn iter(&self) -> Iter<'_, 'a, C> {
        Iter {
            view: self,
            front: 0,
            back: self.entries(),
        }
    }

    /// Present entries only, skipping empty slots.
    pub fn objects(&self) -> impl DoubleEndedIterator<Item = &'a C::Object> + '_ {
        self.iter().flatten()
    }

    fn signed_entries(&self) -> isize {
        isize::try_from(self.entries()).unwrap_or(isize::MAX)
    }
}

/// Scan `collection` once and collect the indices of accepted entries.
fn build_accepted_indices<C: Collection + ?Sized>(collection: &C) -> Vec<usize> {
    let expected = collection.accepted_count();
    let mut indices = Vec::with_capacity(expected);
    indices.extend(
        (0..collection.entry_count()).filter(|&index| collection.accept_object(index).is_ok()),
    );

    if indices.len() != expected {
        warn!(
            "collection reported {expected} accepted entries but {} passed acceptance; \
             iterating over the entries that passed",
            indices.len()
        );
    }
    debug!(
        "cached {} accepted of {} entries",
        indices.len(),
        collection.entry_count()
    );
    indices
}

impl<C: Collection + ?Sized> Default for FilteredIndexView<'_, C> {
    fn default() -> Self {
        Self::unbound()
    }
}

// Manual impls: derives would demand `C: Clone` / `C: Debug`.
impl<C: Collection + ?Sized> Clone for FilteredIndexView<'_, C> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection,
            accepted_indices: self.accepted_indices.clone(),
            use_accepted: self.use_accepted,
        }
    }
}

impl<C: Collection + ?Sized> fmt::Debug for FilteredIndexView<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredIndexView")
            .field("bound", &self.collection.is_some())
            .field("use_accepted", &self.use_accepted)
            .field("entries", &self.entries())
            .field("accepted_indices", &self.accepted_indices)
            .finish()
    }
}

impl<'v, 'a, C: Collection + ?Sized> IntoIterator for &'v FilteredIndexView<'a, C> {
    type Item = Option<&'a C::Object>;
    type IntoIter = Iter<'v, 'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Cursor – explicit position with a fixed direction
// ---------------------------------------------------------------------------

/// Iteration direction of a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// A position inside a [`FilteredIndexView`].
///
/// Cursors compare equal when their positions match; the direction is not
/// compared, so only cursors of the same view and direction should be compared.
/// Positions `-1` and `entries()` are the sentinels returned by
/// [`FilteredIndexView::rend`] and [`FilteredIndexView::end`].
pub struct Cursor<'v, 'a, C: Collection + ?Sized> {
    view: &'v FilteredIndexView<'a, C>,
    position: isize,
    direction: Direction,
}

impl<'v, 'a, C: Collection + ?Sized> Cursor<'v, 'a, C> {
    fn new(view: &'v FilteredIndexView<'a, C>, position: isize, direction: Direction) -> Self {
        Self {
            view,
            position,
            direction,
        }
    }

    /// Logical position; `-1` or `entries()` at a sentinel.
    pub fn position(&self) -> isize {
        self.position
    }

    /// Direction fixed when the cursor was created.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Entry under the cursor, `None` at a sentinel.
    pub fn get(&self) -> Option<&'a C::Object> {
        let index = usize::try_from(self.position).ok()?;
        self.view.get(index)
    }

    /// Move one step in the cursor's direction.
    pub fn advance(&mut self) -> &mut Self {
        self.position += self.direction.step();
        self
    }

    /// Move one step against the cursor's direction.
    pub fn retreat(&mut self) -> &mut Self {
        self.position -= self.direction.step();
        self
    }

    /// Advance, returning the cursor as it was before the move.
    pub fn post_advance(&mut self) -> Self {
        let previous = *self;
        self.advance();
        previous
    }

    /// Retreat, returning the cursor as it was before the move.
    pub fn post_retreat(&mut self) -> Self {
        let previous = *self;
        self.retreat();
        previous
    }
}

impl<C: Collection + ?Sized> Clone for Cursor<'_, '_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Collection + ?Sized> Copy for Cursor<'_, '_, C> {}

impl<C: Collection + ?Sized> PartialEq for Cursor<'_, '_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<C: Collection + ?Sized> Eq for Cursor<'_, '_, C> {}

impl<C: Collection + ?Sized> fmt::Debug for Cursor<'_, '_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("direction", &self.direction)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Iter – std iterator over a view
// ---------------------------------------------------------------------------

/// Iterator returned by [`FilteredIndexView::iter`].
pub struct Iter<'v, 'a, C: Collection + ?Sized> {
    view: &'v FilteredIndexView<'a, C>,
    front: usize,
    back: usize,
}

impl<'a, C: Collection + ?Sized> Iterator for Iter<'_, 'a, C> {
    type Item = Option<&'a C::Object>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some(self.view.get(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<C: Collection + ?Sized> DoubleEndedIterator for Iter<'_, '_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view.get(self.back))
    }
}

impl<C: Collection + ?Sized> ExactSizeIterator for Iter<'_, '_, C> {}

impl<C: Collection + ?Sized> FusedIterator for Iter<'_, '_, C> {}

impl<C: Collection + ?Sized> fmt::Debug for Iter<'_, '_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Letters `a, b, c, ...` with an explicit acceptance mask.
    struct Letters {
        values: Vec<char>,
        accept: Vec<bool>,
        reported_accepted: Option<usize>,
        scans: Cell<usize>,
    }

    impl Letters {
        fn new(accept: &[bool]) -> Self {
            Self {
                values: ('a'..).take(accept.len()).collect(),
                accept: accept.to_vec(),
                reported_accepted: None,
                scans: Cell::new(0),
            }
        }
    }

    impl Collection for Letters {
        type Object = char;
        type Rejection = u32;

        fn entry_count(&self) -> usize {
            self.values.len()
        }

        fn accepted_count(&self) -> usize {
            self.reported_accepted
                .unwrap_or_else(|| self.accept.iter().filter(|a| **a).count())
        }

        fn accept_object(&self, index: usize) -> Result<(), u32> {
            self.scans.set(self.scans.get() + 1);
            match self.accept.get(index) {
                Some(true) => Ok(()),
                Some(false) => Err(1 << 1),
                None => Err(1 << 0),
            }
        }

        fn object_at(&self, index: usize) -> Option<&char> {
            self.values.get(index)
        }
    }

    fn even_only() -> Letters {
        Letters::new(&[true, false, true, false, true])
    }

    fn walk<'a>(mut cursor: Cursor<'_, 'a, Letters>, stop: Cursor<'_, 'a, Letters>) -> Vec<char> {
        let mut out = Vec::new();
        while cursor != stop {
            out.extend(cursor.get());
            cursor.advance();
        }
        out
    }

    #[test]
    fn accepted_view_maps_logical_to_physical() {
        let letters = even_only();
        let view = FilteredIndexView::accepted(&letters);

        assert_eq!(view.entries(), 3);
        assert_eq!(view.accepted_indices(), &[0, 2, 4]);
        assert_eq!(view.get(0), letters.object_at(0));
        assert_eq!(view.get(1), letters.object_at(2));
        assert_eq!(view.get(2), letters.object_at(4));
        assert_eq!(view.get(3), None);
        assert_eq!(view.physical_index(1), Some(2));
        assert_eq!(view.physical_index(3), None);
    }

    #[test]
    fn unfiltered_view_passes_indices_through() {
        let letters = even_only();
        let view = FilteredIndexView::all(&letters);

        assert_eq!(view.entries(), 5);
        assert!(view.accepted_indices().is_empty());
        for index in 0..5 {
            assert_eq!(view.get(index), letters.object_at(index));
        }
        assert_eq!(view.get(5), None);
    }

    #[test]
    fn unfiltered_view_never_evaluates_acceptance() {
        let letters = even_only();
        let _view = FilteredIndexView::all(&letters);
        assert_eq!(letters.scans.get(), 0);

        let _view = FilteredIndexView::accepted(&letters);
        assert_eq!(letters.scans.get(), 5);
    }

    #[test]
    fn unbound_view_is_empty() {
        let view: FilteredIndexView<'_, Letters> = FilteredIndexView::default();

        assert_eq!(view.entries(), 0);
        assert!(view.is_empty());
        assert!(view.collection().is_none());
        assert_eq!(view.get(0), None);
        assert_eq!(view.begin(), view.end());
        assert_eq!(view.rbegin(), view.rend());
        assert_eq!(view.iter().count(), 0);
    }

    #[test]
    fn empty_collection_begins_at_end() {
        let letters = Letters::new(&[]);
        for use_accepted in [false, true] {
            let view = FilteredIndexView::new(&letters, use_accepted);
            assert_eq!(view.entries(), 0);
            assert_eq!(view.begin(), view.end());
            assert_eq!(view.begin().get(), None);
        }
    }

    #[test]
    fn cursors_walk_both_directions() {
        let letters = even_only();
        let view = FilteredIndexView::all(&letters);

        assert_eq!(walk(view.begin(), view.end()), vec!['a', 'b', 'c', 'd', 'e']);
        assert_eq!(walk(view.rbegin(), view.rend()), vec!['e', 'd', 'c', 'b', 'a']);

        let accepted = FilteredIndexView::accepted(&letters);
        assert_eq!(walk(accepted.begin(), accepted.end()), vec!['a', 'c', 'e']);
        assert_eq!(walk(accepted.rbegin(), accepted.rend()), vec!['e', 'c', 'a']);
    }

    #[test]
    fn sentinels_dereference_to_none() {
        let letters = even_only();
        let view = FilteredIndexView::accepted(&letters);

        assert_eq!(view.end().position(), 3);
        assert_eq!(view.end().get(), None);
        assert_eq!(view.rend().position(), -1);
        assert_eq!(view.rend().get(), None);
    }

    #[test]
    fn retreat_undoes_advance() {
        let letters = even_only();
        let view = FilteredIndexView::all(&letters);

        let mut forward = view.begin();
        forward.advance().advance().retreat();
        assert_eq!(forward.position(), 1);
        assert_eq!(forward.get(), Some(&'b'));

        let mut backward = view.rbegin();
        backward.advance();
        assert_eq!(backward.get(), Some(&'d'));
        backward.retreat();
        assert_eq!(backward.get(), Some(&'e'));
        assert_eq!(backward.direction(), Direction::Backward);
    }

    #[test]
    fn post_moves_return_previous_position() {
        let letters = even_only();
        let view = FilteredIndexView::all(&letters);

        let mut cursor = view.begin();
        let before = cursor.post_advance();
        assert_eq!(before.position(), 0);
        assert_eq!(cursor.position(), 1);

        let before = cursor.post_retreat();
        assert_eq!(before.position(), 1);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let letters = even_only();
        let view = FilteredIndexView::accepted(&letters);

        let mut iter = view.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(Some(&'a')));
        assert_eq!(iter.next_back(), Some(Some(&'e')));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(Some(&'c')));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        let forward: Vec<_> = view.objects().copied().collect();
        let mut backward: Vec<_> = view.objects().rev().copied().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn clones_share_collection_and_copy_cache() {
        let letters = even_only();
        let view = FilteredIndexView::accepted(&letters);
        let copy = view.clone();
        drop(view);

        assert!(std::ptr::eq(copy.collection().unwrap(), &letters));
        assert_eq!(copy.accepted_indices(), &[0, 2, 4]);
        assert!(copy.uses_accepted());
    }

    #[test]
    fn overreported_accepted_count_keeps_scanned_indices() {
        let mut letters = even_only();
        letters.reported_accepted = Some(4);
        let view = FilteredIndexView::accepted(&letters);

        assert_eq!(view.entries(), 3);
        assert_eq!(view.accepted_indices(), &[0, 2, 4]);
    }

    #[test]
    fn underreported_accepted_count_keeps_scanned_indices() {
        let mut letters = even_only();
        letters.reported_accepted = Some(1);
        let view = FilteredIndexView::accepted(&letters);

        assert_eq!(view.accepted_indices(), &[0, 2, 4]);
        assert_eq!(view.get(2), Some(&'e'));
    }
}
