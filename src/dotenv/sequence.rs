/// An ordered sequence of items with predicate-based search helpers.
///
/// Positions are stable until an item is removed; `replace` keeps the
/// position of the item it swaps out.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Sequence<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Index of the first item matching `pred`.
    pub fn position<P>(&self, pred: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().position(pred)
    }

    /// First item matching `pred`.
    pub fn first<P>(&self, mut pred: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| pred(item))
    }

    pub fn contains<P>(&self, pred: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().any(pred)
    }

    /// Swap the item at `index` for `item`, returning the old one.
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    pub fn replace(&mut self, index: usize, item: T) -> T {
        std::mem::replace(&mut self.items[index], item)
    }

    /// Drop every item matching `pred`. Returns how many were dropped.
    pub fn reject<P>(&mut self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        before - self.items.len()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
